//! Branches, jumps and returns

use super::Translator;
use crate::abi::SyscallConvention;
use crate::asm::{AsmInst, Reg, RegClass};
use crate::classify::ControlFlow;

impl Translator {
    pub(super) fn handle_control_flow(&mut self, flow: ControlFlow) {
        match flow {
            ControlFlow::IfGoto { cond, target } => self.branch_if_zero(&cond, target),
            ControlFlow::Goto { target } => {
                self.comment("goto");
                self.push(AsmInst::J(target));
            }
            ControlFlow::Return => {
                self.comment("return");
                match self.options.return_label.clone() {
                    Some(label) => self.push(AsmInst::J(label)),
                    None => self.push_all(SyscallConvention::gen_exit()),
                }
            }
        }
    }

    /// The condition is taken to be the most recently allocated general
    /// register, whatever `cond` names.
    fn branch_if_zero(&mut self, cond: &str, target: String) {
        self.comment("if");

        let tested = match self.registers.last(RegClass::General) {
            Some(reg) => reg,
            None => {
                self.report_warning(format!(
                    "branch on '{}' before any general register was allocated, testing $t0",
                    cond
                ));
                Reg::T(0)
            }
        };

        if let Some(bound) = self.registers.temp_register(cond) {
            if bound != tested {
                self.report_note(format!(
                    "condition '{}' is held in {} but {} is tested",
                    cond, bound, tested
                ));
            }
        }

        self.push(AsmInst::Beqz(tested, target));
    }
}
