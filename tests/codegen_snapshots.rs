//! Snapshot and end-to-end tests for the generated C.
//!
//! These tests verify that declarations, definitions, and call sites come
//! out of the generator exactly as a caller would hand-write them, and that
//! record construction obeys the positional/designated/default rules.

use std::str::FromStr;

use keyargs_codegen::{CType, Call, FuncSpec, HeaderFile, Manifest, Registry, Value};

fn adder_registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .declare(
            FuncSpec::new("add", CType::int())
                .field("a", CType::int())
                .field("b", CType::int()),
        )
        .expect("declare add");
    registry
        .declare_clone("accumulate", "add")
        .expect("clone add");
    registry
}

#[test]
fn test_header_snapshot() {
    let header = HeaderFile::new("adder")
        .wrapper_macros(true)
        .render(&adder_registry());
    insta::assert_snapshot!(header.trim_end(), @r#"
    #ifndef ADDER_H
    #define ADDER_H

    typedef struct {
        int a;
        int b;
    } _keyargs_args_add;
    typedef int _keyargs_type_add;
    _keyargs_type_add _keyargs_func_add(_keyargs_args_add);
    #define add(...) _keyargs_func_add((_keyargs_args_add){ __VA_ARGS__ })

    typedef _keyargs_args_add _keyargs_args_accumulate;
    typedef _keyargs_type_add _keyargs_type_accumulate;
    _keyargs_type_accumulate _keyargs_func_accumulate(_keyargs_args_accumulate);
    #define accumulate(...) _keyargs_func_accumulate((_keyargs_args_accumulate){ __VA_ARGS__ })

    #endif /* ADDER_H */
    "#);
}

#[test]
fn test_add_scenario() {
    let mut registry = adder_registry();

    let opener = registry.define("add").expect("define add");
    assert_eq!(
        opener,
        "_keyargs_type_add _keyargs_func_add(_keyargs_args_add args)"
    );

    // call(add, 3, 4)
    let positional = Call::parse("add", "3, 4").unwrap().bind(&registry).unwrap();
    assert_eq!(
        positional.render(),
        "_keyargs_func_add((_keyargs_args_add){ 3, 4 })"
    );

    // call(add, .b=5, .a=2)
    let designated = Call::parse("add", ".b = 5, .a = 2")
        .unwrap()
        .bind(&registry)
        .unwrap();
    assert_eq!(
        designated.render(),
        "_keyargs_func_add((_keyargs_args_add){ .b = 5, .a = 2 })"
    );

    // call(add, .a=10): b defaults to 0
    let partial = Call::parse("add", ".a = 10").unwrap().bind(&registry).unwrap();
    assert_eq!(partial.record().get("a"), Some(&Value::int(10)));
    assert_eq!(partial.record().get("b"), Some(&Value::int(0)));
}

#[test]
fn test_positional_and_designated_construct_equal_records() {
    let registry = adder_registry();

    let positional = Call::parse("add", "3, 4").unwrap().bind(&registry).unwrap();
    let designated = Call::parse("add", ".a = 3, .b = 4")
        .unwrap()
        .bind(&registry)
        .unwrap();
    assert_eq!(positional.record(), designated.record());
}

#[test]
fn test_positional_prefix_defaults_remainder() {
    let registry = adder_registry();
    let bound = Call::parse("add", "7").unwrap().bind(&registry).unwrap();
    assert_eq!(bound.record().get("a"), Some(&Value::int(7)));
    assert_eq!(bound.record().get("b"), Some(&Value::int(0)));
}

#[test]
fn test_clone_law() {
    let registry = adder_registry();

    let f = Call::parse("add", ".a = 1, .b = 2")
        .unwrap()
        .bind(&registry)
        .unwrap();
    let g = Call::parse("accumulate", ".a = 1, .b = 2")
        .unwrap()
        .bind(&registry)
        .unwrap();

    // same rules, identical layout, distinct underlying function
    assert!(f.record().layout_eq(g.record()));
    assert_eq!(g.func_name(), "_keyargs_func_accumulate");
    assert_eq!(
        g.render(),
        "_keyargs_func_accumulate((_keyargs_args_accumulate){ .a = 1, .b = 2 })"
    );
}

#[test]
fn test_greet_scenario() {
    let mut registry = Registry::new();
    registry
        .declare(FuncSpec::parse("void", "greet", "const char *name; int times;").unwrap())
        .unwrap();

    // call(greet, .name="x"): times defaults to 0
    let bound = Call::parse("greet", ".name = \"x\"")
        .unwrap()
        .bind(&registry)
        .unwrap();
    assert_eq!(bound.record().get("times"), Some(&Value::int(0)));
    assert_eq!(
        bound.render(),
        "_keyargs_func_greet((_keyargs_args_greet){ .name = \"x\" })"
    );
}

#[test]
fn test_internal_linkage_declarations() {
    let mut registry = Registry::new();
    registry
        .declare(
            FuncSpec::new("helper", CType::void())
                .field("level", CType::int())
                .internal(),
        )
        .unwrap();

    let decl = registry.render_declaration("helper").unwrap();
    assert!(decl.contains("static _keyargs_type_helper _keyargs_func_helper(_keyargs_args_helper);"));

    let opener = registry.define_static("helper").unwrap();
    assert_eq!(
        opener,
        "static _keyargs_type_helper _keyargs_func_helper(_keyargs_args_helper args)"
    );
}

#[test]
fn test_manifest_to_header() {
    let manifest = Manifest::from_str(
        r#"
        [functions.greet]
        returns = "void"
        args = "const char *name; int times;"

        [functions.greet_loudly]
        clone_of = "greet"
        "#,
    )
    .expect("parse manifest");

    let registry = manifest.build_registry().expect("build registry");
    let header = HeaderFile::new("greeting").render(&registry);
    insta::assert_snapshot!(header.trim_end(), @r#"
    #ifndef GREETING_H
    #define GREETING_H

    typedef struct {
        const char *name;
        int times;
    } _keyargs_args_greet;
    typedef void _keyargs_type_greet;
    _keyargs_type_greet _keyargs_func_greet(_keyargs_args_greet);

    typedef _keyargs_args_greet _keyargs_args_greet_loudly;
    typedef _keyargs_type_greet _keyargs_type_greet_loudly;
    _keyargs_type_greet_loudly _keyargs_func_greet_loudly(_keyargs_args_greet_loudly);

    #endif /* GREETING_H */
    "#);
}
