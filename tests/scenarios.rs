//! End-to-end scenarios: JSON in, generated classes out, for every target.

use json_models::{generate, GeneratedClass, Language};
use serde_json::json;

fn names(classes: &[GeneratedClass]) -> Vec<&str> {
    classes.iter().map(|c| c.class_name.as_str()).collect()
}

fn all_code(classes: &[GeneratedClass]) -> String {
    classes.iter().map(|c| c.code.as_str()).collect::<Vec<_>>().join("\n\n")
}

#[test]
fn id_and_tags_in_kotlin() {
    let classes = generate(&json!({"id": 1, "tags": ["a", "b"]}), Language::Kotlin);
    assert_eq!(names(&classes), ["Root"]);
    assert_eq!(classes[0].code, "data class Root(\n    val id: Int,\n    val tags: List<String>\n)");
}

#[test]
fn id_and_tags_in_every_language() {
    let json = json!({"id": 1, "tags": ["a", "b"]});
    let expected = [
        (Language::Kotlin, ["val id: Int", "val tags: List<String>"]),
        (Language::Java, ["public int id;", "public List<String> tags;"]),
        (Language::TypeScript, ["id: number;", "tags: string[];"]),
        (Language::Swift, ["let id: Int", "let tags: [String]"]),
        (Language::Python, ["id: int", "tags: List[str]"]),
        (Language::CSharp, ["public int Id { get; set; }", "public List<string> Tags { get; set; }"]),
    ];
    for (lang, fragments) in expected {
        let classes = generate(&json, lang);
        assert_eq!(classes.len(), 1, "{lang}");
        for fragment in fragments {
            assert!(classes[0].code.contains(fragment), "{lang}: missing `{fragment}` in\n{}", classes[0].code);
        }
    }
}

#[test]
fn mixed_numbers_in_python() {
    let classes = generate(&json!({"items": [{"x": 1}, {"x": 1.2}]}), Language::Python);
    assert_eq!(names(&classes), ["Root", "Item"]);
    assert!(classes[0].code.contains("items: List[Item]"));
    assert!(classes[1].code.ends_with("class Item:\n    x: float"));
}

#[test]
fn mixed_numbers_widen_in_every_language() {
    let json = json!({"items": [{"x": 1}, {"x": 1.2}]});
    let expected = [
        (Language::Kotlin, "val x: Double"),
        (Language::Java, "public double x;"),
        (Language::TypeScript, "x: number;"),
        (Language::Swift, "let x: Double"),
        (Language::Python, "x: float"),
        (Language::CSharp, "public double X { get; set; }"),
    ];
    for (lang, fragment) in expected {
        let classes = generate(&json, lang);
        assert_eq!(names(&classes), ["Root", "Item"], "{lang}");
        assert!(classes[1].code.contains(fragment), "{lang}: {}", classes[1].code);
    }
}

#[test]
fn null_field_is_nullable_dynamic() {
    let json = json!({"a": null});
    let expected = [
        (Language::Kotlin, "val a: Any? = null"),
        (Language::Java, "public Object a;"),
        (Language::TypeScript, "a: any | null;"),
        (Language::Swift, "let a: Any?"),
        (Language::Python, "a: Optional[Any]"),
        (Language::CSharp, "public object? A { get; set; }"),
    ];
    for (lang, fragment) in expected {
        let classes = generate(&json, lang);
        assert_eq!(classes.len(), 1, "{lang}");
        assert!(classes[0].code.contains(fragment), "{lang}: {}", classes[0].code);
    }
}

#[test]
fn string_or_null_is_optional_string_everywhere() {
    let json = json!({"items": [{"s": "a"}, {"s": null}]});
    let expected = [
        (Language::Kotlin, "val s: String? = null", "Any"),
        (Language::Java, "public String s;", "Object"),
        (Language::TypeScript, "s: string | null;", "any"),
        (Language::Swift, "let s: String?", "Any"),
        (Language::Python, "s: Optional[str]", "Any"),
        (Language::CSharp, "public string? S { get; set; }", "object"),
    ];
    for (lang, fragment, dynamic) in expected {
        let classes = generate(&json, lang);
        assert_eq!(names(&classes), ["Root", "Item"], "{lang}");
        let item = &classes[1].code;
        assert!(item.contains(fragment), "{lang}: missing `{fragment}` in\n{item}");
        assert!(!item.contains(dynamic), "{lang}: fell back to `{dynamic}` in\n{item}");
    }
}

#[test]
fn empty_array_root_is_stable() {
    for lang in Language::ALL {
        let first = generate(&json!([]), lang);
        let second = generate(&json!([]), lang);
        assert_eq!(first, second, "{lang}");
        assert_eq!(names(&first), ["Root"], "{lang}");
    }
    let kotlin = generate(&json!([]), Language::Kotlin);
    assert_eq!(kotlin[0].code, "data class Root(\n    val items: List<Any>\n)");
    let typescript = generate(&json!([]), Language::TypeScript);
    assert_eq!(typescript[0].code, "export interface Root {\n  items: any[];\n}");
}

#[test]
fn array_of_records_root() {
    let json = json!([{"id": 1, "name": "a"}, {"id": 2}]);
    let classes = generate(&json, Language::Kotlin);
    assert_eq!(names(&classes), ["Root", "Item"]);
    assert!(classes[0].code.contains("val items: List<Item>"));
    assert!(classes[1].code.contains("val id: Int,"));
    assert!(classes[1].code.contains("val name: String? = null"));
}

#[test]
fn every_key_survives_in_generated_code() {
    let json = json!({
        "user_name": "a",
        "isActive": true,
        "HTTPCode": 200,
        "first-name": "x",
        "class": "keyword",
        "$type": "user",
        "address": {"zip_code": "1", "Street": "s"},
        "line_items": [{"unit_price": 1.5}]
    });
    let keys = [
        "user_name", "isActive", "HTTPCode", "first-name", "class", "$type", "address", "zip_code", "Street",
        "line_items", "unit_price",
    ];
    for lang in Language::ALL {
        let code = all_code(&generate(&json, lang));
        for key in keys {
            assert!(code.contains(key), "{lang}: key `{key}` lost in\n{code}");
        }
    }
}

#[test]
fn repeated_shapes_are_emitted_once() {
    let json = json!({
        "home": {"geo": {"lat": 1.5, "lng": 2.5}},
        "work": {"geo": {"lat": 3.5, "lng": 4.5}},
        "pins": [{"lat": 0.5, "lng": 0.5}]
    });
    let classes = generate(&json, Language::Swift);
    assert_eq!(names(&classes), ["Root", "Home", "Geo"]);
    assert!(classes[0].code.contains("let work: Home"));
    assert!(classes[0].code.contains("let pins: [Geo]"));
}

#[test]
fn parsed_documents_stay_within_nesting_limit() {
    // serde_json refuses documents nested deeper than 128 levels
    let deep = format!("{}{}", "[".repeat(200), "]".repeat(200));
    assert!(serde_json::from_str::<serde_json::Value>(&deep).is_err());

    let nested = format!("{{\"v\": {}1{}}}", "[".repeat(100), "]".repeat(100));
    let value: serde_json::Value = serde_json::from_str(&nested).unwrap();
    for lang in Language::ALL {
        assert_eq!(names(&generate(&value, lang)), ["Root"], "{lang}");
    }
}

#[test]
fn deeply_nested_arrays_render_in_every_language() {
    let mut value = json!(1);
    for _ in 0..1_000 {
        value = json!([value]);
    }
    let value = json!({ "grid": value });
    for lang in Language::ALL {
        let classes = generate(&value, lang);
        assert_eq!(classes.len(), 1, "{lang}");
    }
}

#[test]
fn deeply_nested_input_does_not_overflow() {
    let mut value = json!({"leaf": 1});
    for _ in 0..2_000 {
        value = json!({ "child": value });
    }
    let classes = generate(&value, Language::Java);
    assert_eq!(classes.len(), 2_001);
    assert_eq!(classes[0].class_name, "Root");
    assert_eq!(classes[1].class_name, "Child");
    assert_eq!(classes[2].class_name, "Child2");
    // Value's drop recurses once per level
    std::mem::forget(value);
}
