#[test]
fn roster_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/roster_error_pass.rs");
    t.pass("tests/ui/roster_error_context.rs");
    t.compile_fail("tests/ui/roster_error_no_context.rs");
}

#[test]
fn entity_model_ui() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/entity_model_reserved_field.rs");
}
