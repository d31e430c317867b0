// Integration tests for the Chest compiler and runtime

use chestc::runtime::Console;
use chestc::{compile, BuildError};

#[test]
fn test_hello_chest() {
    let source = r#"
        building App
            office Greeter
                employee Main
                    show "Hello, Chest!"
    "#;

    // Compile
    let executable = compile(source).expect("Compilation failed");

    // Run with a captured console
    let mut console = Console::captured(Vec::<String>::new());
    executable.run_with(&mut console).expect("Execution failed");

    assert_eq!(console.output(), "Hello, Chest!\n");
}

#[test]
fn test_simple_arithmetic() {
    let source = r#"
        building App
            office Math
                employee Main
                    chest x = 5
                    chest y = 10
                    chest z = x + y
                    show z
    "#;

    let executable = compile(source).expect("Compilation failed");

    let mut console = Console::captured(Vec::<String>::new());
    executable.run_with(&mut console).expect("Execution failed");

    assert_eq!(console.output(), "15\n");
}

#[test]
fn test_dynamic_addition() {
    let source = r#"
        building App
            office Math
                employee Main
                    show 1 + 2
                    show "a" + 1
                    show 1 + "a"
    "#;

    let executable = compile(source).expect("Compilation failed");

    let mut console = Console::captured(Vec::<String>::new());
    executable.run_with(&mut console).expect("Execution failed");

    assert_eq!(console.output(), "3\na1\n1a\n");
}

#[test]
fn test_decide_then_branch() {
    let source = r#"
        building App
            office Check
                employee Main
                    decide 1 < 2
                        show "ok"
                    else
                        show "no"
    "#;

    let executable = compile(source).expect("Compilation failed");

    let mut console = Console::captured(Vec::<String>::new());
    executable.run_with(&mut console).expect("Execution failed");

    assert_eq!(console.output(), "ok\n");
}

#[test]
fn test_decide_else_branch() {
    let source = r#"
        building App
            office Check
                employee Main
                    decide 2 < 1
                        show "ok"
                    else
                        show "no"
    "#;

    let executable = compile(source).expect("Compilation failed");

    let mut console = Console::captured(Vec::<String>::new());
    executable.run_with(&mut console).expect("Execution failed");

    assert_eq!(console.output(), "no\n");
}

#[test]
fn test_nested_decide_in_else() {
    let source = r#"
        building App
            office Check
                employee Main
                    decide false
                        show "outer"
                    else
                        decide true
                            show "inner"
    "#;

    let executable = compile(source).expect("Compilation failed");

    let mut console = Console::captured(Vec::<String>::new());
    executable.run_with(&mut console).expect("Execution failed");

    assert_eq!(console.output(), "inner\n");
}

#[test]
fn test_ask_with_prompt() {
    let source = r#"
        building App
            office Greeter
                employee Main
                    chest name = ask "Name: "
                    show "Hello, " + name
    "#;

    let executable = compile(source).expect("Compilation failed");

    // The prompt is written without a trailing newline
    let mut console = Console::captured(["Ada"]);
    executable.run_with(&mut console).expect("Execution failed");

    assert_eq!(console.output(), "Name: Hello, Ada\n");
}

#[test]
fn test_ask_at_end_of_input_yields_empty_text() {
    let source = r#"
        building App
            office Greeter
                employee Main
                    show "[" + ask + "]"
    "#;

    let executable = compile(source).expect("Compilation failed");

    let mut console = Console::captured(Vec::<String>::new());
    executable.run_with(&mut console).expect("Execution failed");

    assert_eq!(console.output(), "[]\n");
}

#[test]
fn test_uninitialized_chest_prints_null() {
    let source = r#"
        building App
            office Storage
                employee Main
                    chest x
                    show x
    "#;

    let executable = compile(source).expect("Compilation failed");

    let mut console = Console::captured(Vec::<String>::new());
    executable.run_with(&mut console).expect("Execution failed");

    assert_eq!(console.output(), "null\n");
}

#[test]
fn test_attach_has_no_runtime_effect() {
    let source = r#"
        building App
            office Modules
                employee Main
                    attach system
                    show 1
    "#;

    let executable = compile(source).expect("Compilation failed");

    let mut console = Console::captured(Vec::<String>::new());
    executable.run_with(&mut console).expect("Execution failed");

    assert_eq!(console.output(), "1\n");
}

#[test]
fn test_semicolon_separated_statements() {
    let source = r#"
        building App
            office Inline
                employee Main
                    show 1; show 2
    "#;

    let executable = compile(source).expect("Compilation failed");

    let mut console = Console::captured(Vec::<String>::new());
    executable.run_with(&mut console).expect("Execution failed");

    assert_eq!(console.output(), "1\n2\n");
}

#[test]
fn test_brace_introduced_block() {
    let source = r#"
        building App
            office Braced
                employee Main {
                    show 42
    "#;

    let executable = compile(source).expect("Compilation failed");

    let mut console = Console::captured(Vec::<String>::new());
    executable.run_with(&mut console).expect("Execution failed");

    assert_eq!(console.output(), "42\n");
}

#[test]
fn test_employee_parameters_are_parsed() {
    let source = r#"
        building App
            office Greeter
                employee Greet(name, greeting)
                    show "hi"
    "#;

    let executable = compile(source).expect("Compilation failed");

    let mut console = Console::captured(Vec::<String>::new());
    executable.run_with(&mut console).expect("Execution failed");

    assert_eq!(console.output(), "hi\n");
}

// === ERROR SURFACES ===

#[test]
fn test_top_level_statement_is_a_parse_error() {
    let source = "show 1\n";

    let result = compile(source);

    assert!(result.is_err(), "Expected parse error");
    let message = format!("{}", result.unwrap_err());
    assert!(
        message.contains("Expected 'building'"),
        "Error message should name the expected declaration, got: {}",
        message
    );
}

#[test]
fn test_inconsistent_indentation_is_rejected() {
    let source = r#"
        building App
            office A
                  employee Main
                show 1
    "#;

    let result = compile(source);

    assert!(result.is_err(), "Expected lex error");
    let message = format!("{}", result.unwrap_err());
    assert!(
        message.contains("inconsistent indentation"),
        "Error message should mention indentation, got: {}",
        message
    );
}

#[test]
fn test_runtime_type_error_surfaces_to_caller() {
    let source = r#"
        building App
            office Math
                employee Main
                    show "a" * 2
    "#;

    let executable = compile(source).expect("Compilation failed");

    let mut console = Console::captured(Vec::<String>::new());
    let result = executable.run_with(&mut console);

    assert!(result.is_err(), "Expected type coercion error");
    let message = format!("{}", result.unwrap_err());
    assert!(
        message.contains("Cannot apply '*'"),
        "Error message should name the operator, got: {}",
        message
    );
}

#[test]
fn test_program_without_employees_fails_at_run_time() {
    // Comment-only source parses to an empty program
    let source = "// nothing to run\n";

    let executable = compile(source).expect("Compilation failed");
    let result = executable.run();

    assert!(result.is_err(), "Expected missing entry point error");
    let message = format!("{}", result.unwrap_err());
    assert!(
        message.contains("No entry point"),
        "Error message should mention the entry point, got: {}",
        message
    );
}

#[test]
fn test_duplicate_office_is_a_bind_error() {
    let source = r#"
        building App
            office A
                employee One
                    show 1
            office A
                employee Two
                    show 2
    "#;

    let result = compile(source);

    assert!(matches!(result, Err(BuildError::Bind(_))));
    let message = format!("{}", result.unwrap_err());
    assert!(
        message.contains("Duplicate declaration of 'App.A'"),
        "Error message should name the qualified office, got: {}",
        message
    );
}
