//! SPIM/MARS syscall convention
//!
//! Services are selected by loading a service number into `$v0` and issuing
//! `syscall`. The integer argument, when there is one, goes in `$a0`.

use crate::asm::{AsmInst, Reg};

/// Simulator services the translator knows how to invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    PrintInt,
    Exit,
}

impl Service {
    /// Service number loaded into `$v0`
    pub fn code(&self) -> u32 {
        match self {
            Service::PrintInt => 1,
            Service::Exit => 10,
        }
    }
}

pub struct SyscallConvention;

impl SyscallConvention {
    /// Register holding the service number
    pub const SERVICE_REG: Reg = Reg::V0;

    /// Register holding the first argument
    pub const ARG_REG: Reg = Reg::A0;

    /// `li $v0, <code>` followed by `syscall`
    pub fn gen_syscall(service: Service) -> Vec<AsmInst> {
        vec![
            AsmInst::Li(Self::SERVICE_REG, service.code().to_string()),
            AsmInst::Syscall,
        ]
    }

    /// Print the integer in `src`. A float register prints its bit pattern.
    pub fn gen_print_int(src: Reg) -> Vec<AsmInst> {
        let load_arg = if src.is_float() {
            AsmInst::Mfc1(Self::ARG_REG, src)
        } else {
            AsmInst::Move(Self::ARG_REG, src)
        };
        let mut code = vec![load_arg];
        code.extend(Self::gen_syscall(Service::PrintInt));
        code
    }

    /// Terminate the program
    pub fn gen_exit() -> Vec<AsmInst> {
        Self::gen_syscall(Service::Exit)
    }
}
