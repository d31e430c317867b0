//! Translation of the AST into executable units
//!
//! Compilation runs two passes over the program: the first registers an
//! office unit for every office under its qualified `building.office` key,
//! the second compiles each employee body into instructions. Statement and
//! expression translation resolve variables through the scoped symbol table
//! and record inferred types there as declarations are seen; the recorded
//! types are advisory and never influence which runtime operator an
//! expression dispatches to.

use super::errors::BindError;
use super::symbols::SymbolTable;
use crate::parser::ast::{AstNode, BinOp, ChestType, Program};
use crate::runtime::code::{CodeBody, Instr};
use crate::runtime::unit::{EmployeeUnit, Executable, OfficeUnit};
use crate::runtime::value::Value;
use rustc_hash::FxHashMap;

/// Stands in for a jump target until the emitter patches it.
const PLACEHOLDER: usize = usize::MAX;

/// Translates one parsed program into an [`Executable`].
///
/// An emitter accumulates per-compilation state, so it is consumed by
/// [`Emitter::compile`]; create a fresh one for each program.
#[derive(Debug, Default)]
pub struct Emitter {
    offices: Vec<OfficeUnit>,
    office_index: FxHashMap<String, usize>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a program.
    ///
    /// The entry point is the first employee in declaration order. A program
    /// with no employees still compiles; it fails only when run.
    pub fn compile(mut self, program: &Program) -> Result<Executable, BindError> {
        for building in &program.buildings {
            self.register_offices(building)?;
        }
        for building in &program.buildings {
            self.compile_members(building)?;
        }

        let entry = self.find_entry();
        Ok(Executable::new(self.offices, entry))
    }

    /// First pass: allocate an office unit for every office.
    fn register_offices(&mut self, building: &AstNode) -> Result<(), BindError> {
        let AstNode::Building { name, members, .. } = building else {
            return Err(BindError::UnsupportedStatement {
                kind: building.kind_name(),
            });
        };

        for member in members {
            let AstNode::Office {
                name: office_name, ..
            } = member
            else {
                return Err(BindError::UnsupportedStatement {
                    kind: member.kind_name(),
                });
            };

            let key = format!("{}.{}", name, office_name);
            if self.office_index.contains_key(&key) {
                return Err(BindError::DuplicateDeclaration { name: key });
            }
            self.office_index.insert(key.clone(), self.offices.len());
            self.offices.push(OfficeUnit::new(key));
        }

        Ok(())
    }

    /// Second pass: compile every employee body into its office unit.
    fn compile_members(&mut self, building: &AstNode) -> Result<(), BindError> {
        let AstNode::Building { name, members, .. } = building else {
            return Err(BindError::UnsupportedStatement {
                kind: building.kind_name(),
            });
        };

        for member in members {
            let AstNode::Office {
                name: office_name,
                members: employees,
                ..
            } = member
            else {
                return Err(BindError::UnsupportedStatement {
                    kind: member.kind_name(),
                });
            };

            let key = format!("{}.{}", name, office_name);
            let index = self.office_index[&key];

            for employee in employees {
                let AstNode::Employee {
                    name: employee_name,
                    body,
                    ..
                } = employee
                else {
                    return Err(BindError::UnsupportedStatement {
                        kind: employee.kind_name(),
                    });
                };

                let code = BodyEmitter::compile(body)?;
                self.offices[index]
                    .employees
                    .push(EmployeeUnit::new(employee_name.clone(), code));
            }
        }

        Ok(())
    }

    /// The first employee in declaration order, if any.
    fn find_entry(&self) -> Option<(usize, usize)> {
        self.offices
            .iter()
            .position(|office| !office.employees.is_empty())
            .map(|index| (index, 0))
    }
}

/// Code-generation state for a single employee body.
struct BodyEmitter {
    instrs: Vec<Instr>,
    consts: Vec<Value>,
    symbols: SymbolTable,
    slot_count: usize,
}

impl BodyEmitter {
    fn compile(body: &[AstNode]) -> Result<CodeBody, BindError> {
        let mut emitter = BodyEmitter {
            instrs: Vec::new(),
            consts: Vec::new(),
            symbols: SymbolTable::new(),
            slot_count: 0,
        };

        emitter.symbols.push_scope();
        for stmt in body {
            emitter.emit_statement(stmt)?;
        }
        emitter.symbols.pop_scope();
        emitter.emit(Instr::Return);

        Ok(CodeBody {
            instrs: emitter.instrs,
            consts: emitter.consts,
            slot_count: emitter.slot_count,
        })
    }

    fn emit_statement(&mut self, stmt: &AstNode) -> Result<(), BindError> {
        match stmt {
            AstNode::VarDecl { name, init, .. } => self.emit_var_decl(name, init.as_deref()),
            AstNode::Show { expr, .. } => {
                self.emit_expression(expr)?;
                self.emit(Instr::Show);
                Ok(())
            }
            AstNode::Decide {
                cond,
                then_block,
                else_block,
                ..
            } => self.emit_decide(cond, then_block, else_block.as_deref()),
            // A parsed marker with no runtime effect.
            AstNode::Attach { .. } => Ok(()),
            other => Err(BindError::UnsupportedStatement {
                kind: other.kind_name(),
            }),
        }
    }

    /// The name is declared before its initializer is emitted, so an
    /// initializer may reference the variable it declares (and reads the
    /// empty slot).
    fn emit_var_decl(&mut self, name: &str, init: Option<&AstNode>) -> Result<(), BindError> {
        let slot = self.new_slot();
        let ty = init.and_then(|expr| self.infer_type(expr));
        self.symbols.declare(name, slot, ty)?;

        if let Some(expr) = init {
            self.emit_expression(expr)?;
            self.emit(Instr::StoreLocal(slot));
        }

        Ok(())
    }

    /// Lower a decide statement to a conditional branch over the then-block
    /// and an unconditional jump over the else-block, each branch compiled
    /// in a fresh scope.
    fn emit_decide(
        &mut self,
        cond: &AstNode,
        then_block: &[AstNode],
        else_block: Option<&[AstNode]>,
    ) -> Result<(), BindError> {
        self.emit_expression(cond)?;
        let branch_to_else = self.emit(Instr::BranchIfFalse(PLACEHOLDER));

        self.symbols.push_scope();
        for stmt in then_block {
            self.emit_statement(stmt)?;
        }
        self.symbols.pop_scope();

        let jump_to_end = self.emit(Instr::Jump(PLACEHOLDER));
        self.patch_jump(branch_to_else);

        if let Some(block) = else_block {
            self.symbols.push_scope();
            for stmt in block {
                self.emit_statement(stmt)?;
            }
            self.symbols.pop_scope();
        }
        self.patch_jump(jump_to_end);

        Ok(())
    }

    fn emit_expression(&mut self, expr: &AstNode) -> Result<(), BindError> {
        match expr {
            AstNode::NumberLiteral(value, _) => {
                let index = self.push_const(Value::Number(*value));
                self.emit(Instr::LoadConst(index));
            }
            AstNode::TextLiteral(text, _) => {
                let index = self.push_const(Value::Text(text.clone()));
                self.emit(Instr::LoadConst(index));
            }
            AstNode::BoolLiteral(value, _) => {
                let index = self.push_const(Value::Bool(*value));
                self.emit(Instr::LoadConst(index));
            }
            AstNode::Ident(name, _) => {
                let slot =
                    self.symbols
                        .lookup(name)
                        .ok_or_else(|| BindError::UndeclaredVariable {
                            name: name.clone(),
                        })?;
                self.emit(Instr::LoadLocal(slot));
            }
            AstNode::Binary {
                op, left, right, ..
            } => {
                self.emit_expression(left)?;
                self.emit_expression(right)?;
                self.emit(Instr::Binary(*op));
            }
            AstNode::Ask { prompt, .. } => {
                let prompt_index = prompt
                    .as_ref()
                    .map(|text| self.push_const(Value::Text(text.clone())));
                self.emit(Instr::Ask(prompt_index));
            }
            other => {
                return Err(BindError::UnsupportedExpression {
                    kind: other.kind_name(),
                });
            }
        }
        Ok(())
    }

    /// Infer an expression's type for the symbol table. Advisory only.
    fn infer_type(&self, expr: &AstNode) -> Option<ChestType> {
        match expr {
            AstNode::NumberLiteral(..) => Some(ChestType::Number),
            AstNode::TextLiteral(..) => Some(ChestType::Text),
            AstNode::BoolLiteral(..) => Some(ChestType::Bool),
            AstNode::Ask { .. } => Some(ChestType::Text),
            AstNode::Ident(name, _) => self.symbols.lookup_type(name),
            AstNode::Binary {
                op, left, right, ..
            } => infer_binary_type(*op, self.infer_type(left), self.infer_type(right)),
            _ => None,
        }
    }

    fn emit(&mut self, instr: Instr) -> usize {
        self.instrs.push(instr);
        self.instrs.len() - 1
    }

    /// Point the placeholder jump at `index` past the last emitted
    /// instruction.
    fn patch_jump(&mut self, index: usize) {
        let target = self.instrs.len();
        match &mut self.instrs[index] {
            Instr::BranchIfFalse(t) | Instr::Jump(t) => *t = target,
            _ => unreachable!("patched instruction is not a jump"),
        }
    }

    fn push_const(&mut self, value: Value) -> usize {
        self.consts.push(value);
        self.consts.len() - 1
    }

    fn new_slot(&mut self) -> usize {
        let slot = self.slot_count;
        self.slot_count += 1;
        slot
    }
}

/// Result type of a binary operator given its operand types: `+` with a
/// text operand concatenates, the other arithmetic operators produce
/// numbers, and every comparison produces a boolean.
fn infer_binary_type(
    op: BinOp,
    left: Option<ChestType>,
    right: Option<ChestType>,
) -> Option<ChestType> {
    match op {
        BinOp::Add if left == Some(ChestType::Text) || right == Some(ChestType::Text) => {
            Some(ChestType::Text)
        }
        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div => Some(ChestType::Number),
        BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge | BinOp::Eq | BinOp::Ne => {
            Some(ChestType::Bool)
        }
    }
}
