//! Executable units and the instruction interpreter
//!
//! Compilation produces an [`Executable`]: office units keyed by their
//! qualified `building.office` name, each holding compiled employees in
//! declaration order. Running the executable locates the entry point and
//! interprets its body over an operand stack.

use super::code::{CodeBody, Instr};
use super::console::Console;
use super::errors::RuntimeError;
use super::ops;
use super::value::Value;

/// A compiled employee: a named executable body.
#[derive(Debug, Clone)]
pub struct EmployeeUnit {
    pub name: String,
    pub(crate) body: CodeBody,
}

impl EmployeeUnit {
    pub(crate) fn new(name: String, body: CodeBody) -> Self {
        Self { name, body }
    }

    pub fn body(&self) -> &CodeBody {
        &self.body
    }
}

/// A compiled office: a named group of employees.
#[derive(Debug, Clone)]
pub struct OfficeUnit {
    /// Qualified `building.office` name.
    pub name: String,
    pub(crate) employees: Vec<EmployeeUnit>,
}

impl OfficeUnit {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            employees: Vec::new(),
        }
    }

    pub fn employees(&self) -> &[EmployeeUnit] {
        &self.employees
    }
}

/// A compiled program, ready to run.
#[derive(Debug, Clone)]
pub struct Executable {
    offices: Vec<OfficeUnit>,
    entry: Option<(usize, usize)>,
}

impl Executable {
    pub(crate) fn new(offices: Vec<OfficeUnit>, entry: Option<(usize, usize)>) -> Self {
        Self { offices, entry }
    }

    /// The office units in declaration order.
    pub fn offices(&self) -> &[OfficeUnit] {
        &self.offices
    }

    /// The entry-point employee: the first employee of the program in
    /// declaration order, if the program has any employee at all.
    pub fn entry(&self) -> Option<&EmployeeUnit> {
        let (office, employee) = self.entry?;
        Some(&self.offices[office].employees[employee])
    }

    /// Run the entry point against the process console.
    pub fn run(&self) -> Result<(), RuntimeError> {
        let mut console = Console::standard();
        self.run_with(&mut console)
    }

    /// Run the entry point against the given console.
    pub fn run_with(&self, console: &mut Console) -> Result<(), RuntimeError> {
        let entry = self.entry().ok_or(RuntimeError::MissingEntryPoint)?;
        execute_body(&entry.body, console)
    }
}

/// Interpret one compiled body.
fn execute_body(body: &CodeBody, console: &mut Console) -> Result<(), RuntimeError> {
    let mut locals = vec![Value::Empty; body.slot_count];
    let mut stack: Vec<Value> = Vec::new();
    let mut pc = 0;

    while pc < body.instrs.len() {
        match body.instrs[pc] {
            Instr::LoadConst(index) => stack.push(body.consts[index].clone()),
            Instr::LoadLocal(slot) => stack.push(locals[slot].clone()),
            Instr::StoreLocal(slot) => {
                locals[slot] = pop(&mut stack);
            }
            Instr::Binary(op) => {
                let right = pop(&mut stack);
                let left = pop(&mut stack);
                stack.push(ops::evaluate_binary_op(op, &left, &right)?);
            }
            Instr::Show => {
                let value = pop(&mut stack);
                console.write_line(&value.to_string());
            }
            Instr::Ask(prompt) => {
                if let Some(index) = prompt {
                    if let Some(text) = body.consts[index].as_text() {
                        console.write(text);
                    }
                }
                let line = console.read_line();
                stack.push(Value::Text(line));
            }
            Instr::BranchIfFalse(target) => {
                let cond = pop(&mut stack);
                if !ops::is_truthy(&cond) {
                    pc = target;
                    continue;
                }
            }
            Instr::Jump(target) => {
                pc = target;
                continue;
            }
            Instr::Return => break,
        }
        pc += 1;
    }

    Ok(())
}

/// Pop an operand. The emitter balances every push with a consumer, so an
/// empty stack here is a code-generation bug, not a user error.
fn pop(stack: &mut Vec<Value>) -> Value {
    stack.pop().expect("operand stack underflow")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_body(body: CodeBody) -> String {
        let office = OfficeUnit {
            name: "Test.Office".to_string(),
            employees: vec![EmployeeUnit::new("Main".to_string(), body)],
        };
        let executable = Executable::new(vec![office], Some((0, 0)));

        let mut console = Console::captured(Vec::<String>::new());
        executable.run_with(&mut console).unwrap();
        console.output().to_string()
    }

    #[test]
    fn test_add_and_show() {
        let body = CodeBody {
            instrs: vec![
                Instr::LoadConst(0),
                Instr::LoadConst(1),
                Instr::Binary(crate::parser::ast::BinOp::Add),
                Instr::Show,
                Instr::Return,
            ],
            consts: vec![Value::Number(1.0), Value::Number(2.0)],
            slot_count: 0,
        };
        assert_eq!(run_body(body), "3\n");
    }

    #[test]
    fn test_branch_if_false_skips() {
        // Show the constant only when the (false) condition holds.
        let body = CodeBody {
            instrs: vec![
                Instr::LoadConst(0),
                Instr::BranchIfFalse(4),
                Instr::LoadConst(1),
                Instr::Show,
                Instr::Return,
            ],
            consts: vec![Value::Bool(false), Value::Text("skipped".to_string())],
            slot_count: 0,
        };
        assert_eq!(run_body(body), "");
    }

    #[test]
    fn test_locals_round_trip_through_slots() {
        let body = CodeBody {
            instrs: vec![
                Instr::LoadConst(0),
                Instr::StoreLocal(0),
                Instr::LoadLocal(0),
                Instr::Show,
                Instr::Return,
            ],
            consts: vec![Value::Text("stored".to_string())],
            slot_count: 1,
        };
        assert_eq!(run_body(body), "stored\n");
    }

    #[test]
    fn test_unstored_slot_reads_empty() {
        let body = CodeBody {
            instrs: vec![Instr::LoadLocal(0), Instr::Show, Instr::Return],
            consts: vec![],
            slot_count: 1,
        };
        assert_eq!(run_body(body), "null\n");
    }

    #[test]
    fn test_ask_writes_prompt_and_pushes_line() {
        let body = CodeBody {
            instrs: vec![Instr::Ask(Some(0)), Instr::Show, Instr::Return],
            consts: vec![Value::Text("Name: ".to_string())],
            slot_count: 0,
        };

        let office = OfficeUnit {
            name: "Test.Office".to_string(),
            employees: vec![EmployeeUnit::new("Main".to_string(), body)],
        };
        let executable = Executable::new(vec![office], Some((0, 0)));

        let mut console = Console::captured(["Ada"]);
        executable.run_with(&mut console).unwrap();
        assert_eq!(console.output(), "Name: Ada\n");
    }

    #[test]
    fn test_running_without_entry_point_fails() {
        let executable = Executable::new(Vec::new(), None);
        let mut console = Console::captured(Vec::<String>::new());
        let err = executable.run_with(&mut console).unwrap_err();
        assert_eq!(err, RuntimeError::MissingEntryPoint);
    }
}
