/* src/engine/rust/src/tests/mod.rs */

use super::*;
use serde_json::json;
use std::collections::HashMap;


const PAGE: &str = r#"
<html><head><title>title of test</title></head><body>
<form name="myform" action="./" method="POST">
  <input type="text" name="title"/>
  <input type="checkbox" name="chk" value="chkval" checked=checked/>
  <input type="radio" name="rdo" value="rdoval1" checked=checked/>
  <input type="radio" name="rdo" value="rdoval2" />
  <select name="select">
    <option value="1">1</option>
    <option value="2" selected=selected>2</option>
  </select>
  <textarea id="body" name="body" cols="80" rows="20" placeholder="hoge">gakuburu</textarea>
  <input type="submit" value="Send">
</form>
</body></html>
"#;

const FILLED: &str = r#"
<html><head><title>title of test</title></head><body>
<form name="myform" action="./" method="POST">
  <input type="text" name="title" value="hogeTitle"/>
  <input type="checkbox" name="chk" value="chkval"/>
  <input type="radio" name="rdo" value="rdoval1"/>
  <input type="radio" name="rdo" value="rdoval2" checked="checked"/>
  <select name="select">
    <option value="1" selected="selected">1</option>
    <option value="2">2</option>
  </select>
  <textarea id="body" name="body" cols="80" rows="20" placeholder="hoge">hogehoge</textarea>
  <input type="submit" value="Send">
</form>
</body></html>
"#;

fn page_data() -> serde_json::Value {
  json!({
    "title": "hogeTitle",
    "chk": "1",
    "rdo": "rdoval2",
    "select": "1",
    "body": "hogehoge",
  })
}

#[test]
fn fills_whole_page() {
  let html = fill_str(PAGE, &page_data(), &FillOptions::default()).unwrap();
  assert_eq!(html, FILLED);
}

#[test]
fn byte_api_matches_str_api() {
  let bytes = fill(PAGE.as_bytes(), &page_data(), &FillOptions::default()).unwrap();
  assert_eq!(bytes, FILLED.as_bytes());
}

#[test]
fn filler_is_reusable_across_documents() {
  let filler = Filler::default();
  let first = filler.fill_str(PAGE, &page_data()).unwrap();
  let second = filler.fill_str(PAGE, &json!({"title": "other"})).unwrap();
  assert_eq!(first, FILLED);
  assert!(second.contains(r#"<input type="text" name="title" value="other"/>"#));
  // no data for rdo: the whole group is cleared
  assert!(second.contains(r#"<input type="radio" name="rdo" value="rdoval1"/>"#));
}

#[test]
fn hash_map_source() {
  let mut data: HashMap<String, Vec<String>> = HashMap::new();
  data.insert("title".to_string(), vec!["hogeTitle".to_string()]);
  data.insert("rdo".to_string(), vec!["rdoval2".to_string()]);
  data.insert("chk".to_string(), vec!["1".to_string()]);
  data.insert("select".to_string(), vec!["1".to_string()]);
  data.insert("body".to_string(), vec!["hogehoge".to_string()]);
  assert_eq!(fill_str(PAGE, &data, &FillOptions::default()).unwrap(), FILLED);
}

#[test]
fn document_without_forms_is_identical() {
  let html = r#"<p>hello</p><input name="title"><select name=s><option>1</option></select>"#;
  let out = fill_str(html, &json!({"title": "x", "s": "1"}), &FillOptions::default()).unwrap();
  assert_eq!(out, html);
}

#[test]
fn options_from_json() {
  let options = FillOptions::from_json(&json!({"ignoreFields": ["title"]})).unwrap();
  let html = fill_str(PAGE, &page_data(), &options).unwrap();
  assert!(html.contains(r#"<input type="text" name="title"/>"#));
  assert!(html.contains(">hogehoge</textarea>"));
}

#[test]
fn unsupported_value_fails_loudly() {
  let err = fill_str(PAGE, &json!({"title": {"nested": 1}}), &FillOptions::default()).unwrap_err();
  assert!(matches!(
    err,
    FillError::UnsupportedValueType { ref field, kind: "object" } if field == "title"
  ));
}

#[test]
fn unsupported_value_for_untouched_field_is_not_resolved() {
  // fields never named by a control are never looked up
  let html = fill_str(PAGE, &json!({"unused": {"nested": 1}}), &FillOptions::default());
  assert!(html.is_ok());
}

#[test]
fn invalid_utf8_outside_controls_is_preserved() {
  let doc = b"\xff<form id=f>\xfe<input name=q></form>\xfd";
  let out = fill(doc, &json!({"q": "x"}), &FillOptions::default()).unwrap();
  assert_eq!(out, b"\xff<form id=f>\xfe<input name=q value=\"x\"></form>\xfd");
}
