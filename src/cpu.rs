//! The sixteen opcode handlers. Each one decodes its operand fields (done
//! by `Instruction::decode`) and performs the arithmetic LC-3 §A.2
//! specifies; handlers that write a GPR call `update_flags` on it
//! afterwards, and no others touch `cond`.
//!
//! Every PC-relative handler adds its offset to `registers.pc` *after*
//! `Machine::step` has already incremented it past the instruction being
//! executed — PC-relative addressing is always relative to the next
//! instruction, never the current one.

use crate::bits::SignExtend;
use crate::console::ConsolePort;
use crate::halt::{HaltNotifier, StopReason};
use crate::instruction::{decode_trap_vector, Instruction};
use crate::machine::Machine;
use crate::registers::Register::R7;

pub fn execute<C: ConsolePort>(
    machine: &mut Machine<C>,
    instruction: Instruction,
    raw: u16,
    notifier: &mut dyn HaltNotifier,
) {
    match instruction {
        // BR: branch if any tested condition flag matches `cond`.
        Instruction::Br(cond, pc_offset) => {
            let taken = match machine.registers.cond {
                crate::registers::Condition::Neg => cond.n,
                crate::registers::Condition::Zro => cond.z,
                crate::registers::Condition::Pos => cond.p,
            };
            if taken {
                machine.registers.pc =
                    machine.registers.pc.wrapping_add(pc_offset.sign_extend(9));
            }
        }

        // ADD: DR <- SR1 + SR2.
        Instruction::Add(dr, sr1, sr2) => {
            let value = machine
                .registers
                .read(sr1)
                .wrapping_add(machine.registers.read(sr2));
            machine.registers.write(dr, value);
            machine.registers.update_flags(dr);
        }

        // ADD immediate: DR <- SR1 + sext(imm5).
        Instruction::AddImm(dr, sr1, imm5) => {
            let value = machine.registers.read(sr1).wrapping_add(imm5);
            machine.registers.write(dr, value);
            machine.registers.update_flags(dr);
        }

        // AND: DR <- SR1 & SR2.
        Instruction::And(dr, sr1, sr2) => {
            let value = machine.registers.read(sr1) & machine.registers.read(sr2);
            machine.registers.write(dr, value);
            machine.registers.update_flags(dr);
        }

        // AND immediate: DR <- SR1 & sext(imm5).
        Instruction::AndImm(dr, sr1, imm5) => {
            let value = machine.registers.read(sr1) & imm5;
            machine.registers.write(dr, value);
            machine.registers.update_flags(dr);
        }

        // NOT: DR <- ~SR.
        Instruction::Not(dr, sr) => {
            let value = !machine.registers.read(sr);
            machine.registers.write(dr, value);
            machine.registers.update_flags(dr);
        }

        // LD: DR <- mem[PC + sext(off,9)].
        Instruction::Ld(dr, pc_offset) => {
            let addr = machine.registers.pc.wrapping_add(pc_offset.sign_extend(9));
            let value = machine.mem_read(addr);
            machine.registers.write(dr, value);
            machine.registers.update_flags(dr);
        }

        // LDI: DR <- mem[mem[PC + sext(off,9)]].
        Instruction::Ldi(dr, pc_offset) => {
            let pointer_addr = machine.registers.pc.wrapping_add(pc_offset.sign_extend(9));
            let addr = machine.mem_read(pointer_addr);
            let value = machine.mem_read(addr);
            machine.registers.write(dr, value);
            machine.registers.update_flags(dr);
        }

        // LDR: DR <- mem[BaseR + sext(off,6)].
        Instruction::Ldr(dr, base, offset) => {
            let addr = machine.registers.read(base).wrapping_add(offset.sign_extend(6));
            let value = machine.mem_read(addr);
            machine.registers.write(dr, value);
            machine.registers.update_flags(dr);
        }

        // LEA: DR <- PC + sext(off,9). Doesn't touch memory.
        Instruction::Lea(dr, pc_offset) => {
            let addr = machine.registers.pc.wrapping_add(pc_offset.sign_extend(9));
            machine.registers.write(dr, addr);
            machine.registers.update_flags(dr);
        }

        // ST: mem[PC + sext(off,9)] <- SR.
        Instruction::St(sr, pc_offset) => {
            let addr = machine.registers.pc.wrapping_add(pc_offset.sign_extend(9));
            let value = machine.registers.read(sr);
            machine.mem_write(addr, value);
        }

        // STI: mem[mem[PC + sext(off,9)]] <- SR.
        Instruction::Sti(sr, pc_offset) => {
            let pointer_addr = machine.registers.pc.wrapping_add(pc_offset.sign_extend(9));
            let addr = machine.mem_read(pointer_addr);
            let value = machine.registers.read(sr);
            machine.mem_write(addr, value);
        }

        // STR: mem[BaseR + sext(off,6)] <- SR.
        Instruction::Str(sr, base, offset) => {
            let addr = machine.registers.read(base).wrapping_add(offset.sign_extend(6));
            let value = machine.registers.read(sr);
            machine.mem_write(addr, value);
        }

        // JMP: PC <- BaseR. RET is JMP with BaseR = R7.
        Instruction::Jmp(base) => {
            machine.registers.pc = machine.registers.read(base);
        }

        // JSR: R7 <- PC, then PC <- PC + sext(off,11).
        Instruction::Jsr(pc_offset) => {
            let ret = machine.registers.pc;
            machine.registers.pc = machine.registers.pc.wrapping_add(pc_offset.sign_extend(11));
            machine.registers.write(R7, ret);
        }

        // JSRR: R7 <- PC, then PC <- BaseR.
        Instruction::Jsrr(base) => {
            let ret = machine.registers.pc;
            machine.registers.pc = machine.registers.read(base);
            machine.registers.write(R7, ret);
        }

        // TRAP: R7 <- PC, then dispatch on the trap vector.
        Instruction::Trap(vector) => {
            machine.registers.write(R7, machine.registers.pc);
            let decoded = decode_trap_vector(vector).ok_or(vector);
            let should_halt = crate::trap::dispatch(
                decoded,
                &mut machine.registers,
                &mut machine.memory,
                &mut machine.console,
            );
            if should_halt {
                machine.halt();
            }
        }

        // RTI is privileged-mode-only and this emulator never enters
        // privileged mode, so it's illegal here, same as RES.
        Instruction::Rti | Instruction::Res => {
            notifier.notify(StopReason::IllegalOpcode(raw));
            panic!("illegal opcode {raw:#06x}");
        }
    }
}
