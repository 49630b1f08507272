//! trybuild compile-time tests for registrar_macros

#[test]
fn trybuild_service_module() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/service_module_ok.rs");
}
