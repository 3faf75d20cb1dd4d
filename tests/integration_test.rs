// ABOUTME: Integration tests driving the full pipeline through the library API

use rlox::value::Value;
use rlox::Lox;

/// Runs a program and returns the session for inspecting globals and flags.
fn run(source: &str) -> Lox {
    let mut lox = Lox::new();
    lox.run(source);
    lox
}

fn global(lox: &Lox, name: &str) -> Option<Value> {
    lox.globals().lookup(name)
}

#[test]
fn test_clean_run_sets_no_flags() {
    let lox = run("var a = 1 + 2;");
    assert!(!lox.had_error());
    assert!(!lox.had_runtime_error());
    assert_eq!(global(&lox, "a"), Some(Value::Number(3.0)));
}

#[test]
fn test_parse_error_halts_before_execution() {
    let lox = run("var touched = 1; var = ;");
    assert!(lox.had_error());
    assert_eq!(global(&lox, "touched"), None);
}

#[test]
fn test_resolve_error_halts_before_execution() {
    // The program parses, but the top-level return fails resolution, so
    // nothing executes
    let lox = run("var touched = 1; return 2;");
    assert!(lox.had_error());
    assert!(!lox.had_runtime_error());
    assert_eq!(global(&lox, "touched"), None);
}

#[test]
fn test_runtime_error_halts_rest_of_batch() {
    let lox = run("var a = 1; ghost; var b = 2;");
    assert!(!lox.had_error());
    assert!(lox.had_runtime_error());
    assert_eq!(global(&lox, "a"), Some(Value::Number(1.0)));
    assert_eq!(global(&lox, "b"), None);
}

#[test]
fn test_state_persists_across_runs() {
    // A REPL session feeds one Lox value line by line
    let mut lox = Lox::new();
    lox.run("var a = 1;");
    lox.run("var b = a + 1;");
    assert_eq!(global(&lox, "b"), Some(Value::Number(2.0)));
}

#[test]
fn test_closures_work_across_runs() {
    let mut lox = Lox::new();
    lox.run("fun makeCounter() { var i = 0; fun count() { i = i + 1; return i; } return count; }");
    lox.run("var c = makeCounter();");
    lox.run("var first = c();");
    lox.run("var second = c();");
    assert!(!lox.had_error());
    assert!(!lox.had_runtime_error());
    assert_eq!(global(&lox, "first"), Some(Value::Number(1.0)));
    assert_eq!(global(&lox, "second"), Some(Value::Number(2.0)));
}

#[test]
fn test_reset_error_lets_a_session_continue() {
    let mut lox = Lox::new();
    lox.run("var broken = ;");
    assert!(lox.had_error());

    lox.reset_error();
    assert!(!lox.had_error());

    lox.run("var fine = 10;");
    assert!(!lox.had_error());
    assert_eq!(global(&lox, "fine"), Some(Value::Number(10.0)));
}

#[test]
fn test_shadowing_leaves_outer_binding_unchanged() {
    let lox = run("var x = 1; var inner; { var x = 2; inner = x; } var outer = x;");
    assert_eq!(global(&lox, "inner"), Some(Value::Number(2.0)));
    assert_eq!(global(&lox, "outer"), Some(Value::Number(1.0)));
}

#[test]
fn test_closure_sees_later_mutation_of_captured_environment() {
    // The closure captures the environment, not a copy of the value
    let lox = run(
        "var result; \
         { var captured = \"before\"; \
           fun read() { return captured; } \
           captured = \"after\"; \
           result = read(); }",
    );
    assert_eq!(
        global(&lox, "result"),
        Some(Value::String("after".to_string()))
    );
}

#[test]
fn test_short_circuit_preserves_operand_values() {
    let lox = run("var a = nil or 0; var b = \"\" and nil;");
    assert_eq!(global(&lox, "a"), Some(Value::Number(0.0)));
    assert_eq!(global(&lox, "b"), Some(Value::Nil));
}

#[test]
fn test_multiple_diagnostics_in_one_pass() {
    // Synchronization lets the parser report both bad declarations
    let lox = run("var = 1; var = 2; var ok = 3;");
    assert!(lox.had_error());
    // And the good declaration still parsed (though nothing executed)
    assert_eq!(global(&lox, "ok"), None);
}

#[test]
fn test_recursive_closure_through_environment() {
    let lox = run(
        "fun countdown(n) { if (n <= 0) return \"done\"; return countdown(n - 1); } \
         var result = countdown(100);",
    );
    assert!(!lox.had_runtime_error());
    assert_eq!(
        global(&lox, "result"),
        Some(Value::String("done".to_string()))
    );
}
