//! Round-trip tests over realistic files

use jrefactor_core::{RoundTripValidator, parse_compilation_unit, render};

const SERVICE: &str = r#"/*
 * Copyright header
 */
package com.example.service;

import java.util.List;
import java.util.ArrayList;
import static java.util.Objects.requireNonNull;

/**
 * Keeps track of users.
 */
public final class UserService implements Service, AutoCloseable {

    private static final int LIMIT = 10;   // max users
    private final List<String> names = new ArrayList<>();
    private int count, total = 0;

    public UserService(String first) throws IllegalStateException {
        requireNonNull(first);
        this.names.add(first);
    }

    @Deprecated
    public int size() { return names.size(); }
}
"#;

const CONTROL_FLOW: &str = "class Loops {\r\n\tint run(int n) {\r\n\t\tint i = 0;\r\n\t\twhile (i < n && !done(i)) {\r\n\t\t\ti += 2;\r\n\t\t\tif (i % 3 == 0) continue_();\r\n\t\t\telse { i--; }\r\n\t\t}\r\n\t\treturn -i;\r\n\t}\r\n\r\n\tinterface Step { void apply(char c, long l, double d); }\r\n}\r\n";

#[test]
fn test_control_flow_round_trips() {
    let result = RoundTripValidator::new().validate(CONTROL_FLOW);
    assert!(result.is_valid(), "{:?}", result.issues());
    assert_eq!(result.printed, CONTROL_FLOW);
}

#[test]
fn test_annotation_is_a_parse_error() {
    let result = RoundTripValidator::new().validate(SERVICE);
    assert!(!result.is_valid());
    assert!(result.parse_error.is_some());
}

#[test]
fn test_service_without_annotation_round_trips() {
    let source = SERVICE.replace("    @Deprecated\n", "");
    let unit = parse_compilation_unit(&source).unwrap();
    assert_eq!(render(&unit), source);
    assert_eq!(unit.imports.len(), 3);
    assert_eq!(unit.package_name().as_deref(), Some("com.example.service"));
    assert!(unit.imports[2].is_static());
}

#[test]
fn test_literals_and_odd_spacing_round_trip() {
    let source = "class  A{int x=0x1F;long y = 10L ;String s=\"a\\\"b\";char c='\\n';boolean b=!true|false;Object o=null;}";
    let result = RoundTripValidator::new().validate(source);
    assert!(result.is_valid(), "{:?}", result.issues());
}
