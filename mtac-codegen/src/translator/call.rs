//! `param` / `call`
//!
//! `print` is the only callee with a calling convention: it prints one
//! integer through the simulator's syscall interface. Calls to anything
//! else are ignored.

use super::Translator;
use crate::abi::{Service, SyscallConvention};
use crate::asm::{AsmInst, Reg, RegClass};
use crate::classify::{is_temp_name, CallInst};
use log::debug;
use mtac_common::SymbolType;

/// The one built-in callee
const PRINT: &str = "print";

impl Translator {
    pub(super) fn handle_call(&mut self, call: CallInst) {
        match call {
            CallInst::Param { value } => {
                debug!("{}: pending argument '{}'", self.location, value);
                self.pending_args.push(value);
            }
            CallInst::Call { callee, arg_count } if callee == PRINT => self.call_print(arg_count),
            CallInst::Call { callee, .. } => {
                debug!("{}: call to unsupported function '{}' ignored", self.location, callee);
            }
        }
    }

    fn call_print(&mut self, arg_count: Option<u32>) {
        if let Some(count) = arg_count.filter(|&n| n != 1) {
            self.report_warning(format!("print takes one argument, call passes {}", count));
        }

        let Some(arg) = self.pending_args.pop() else {
            self.report_error(
                "print called with no pending argument, nothing printed".to_string(),
                "a `param` line must precede the call".to_string(),
            );
            return;
        };

        self.comment("print");

        if let Some(reg) = self.registers.temp_register(&arg) {
            self.push_all(SyscallConvention::gen_print_int(reg));
            return;
        }

        if is_temp_name(&arg) {
            // Never bound: fall back to the register of the same number
            match arg[1..].parse::<u8>() {
                Ok(n) if (n as usize) < RegClass::General.capacity() => {
                    self.report_warning(format!("temporary '{}' has no register binding, printing {}", arg, Reg::T(n)));
                    self.push_all(SyscallConvention::gen_print_int(Reg::T(n)));
                }
                _ => self.report_error(
                    format!("temporary '{}' has no register, nothing printed", arg),
                    format!("only {} general registers exist", RegClass::General.capacity()),
                ),
            }
            return;
        }

        let arg_reg = SyscallConvention::ARG_REG;
        if arg.parse::<i32>().is_ok() || arg.starts_with('\'') {
            self.push(AsmInst::Li(arg_reg, arg));
        } else {
            // Floats cannot be loaded into $a0; print their bit pattern
            let ty = match self.variable_type(&arg) {
                SymbolType::Float => SymbolType::Int,
                ty => ty,
            };
            self.push(AsmInst::load_for(ty, arg_reg, &arg));
        }
        self.push_all(SyscallConvention::gen_syscall(Service::PrintInt));
    }
}
