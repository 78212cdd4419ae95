//! Placeholder folding.
//!
//! Label lines parse into label-only placeholder instructions. Folding
//! removes each placeholder, hands its label to the following instruction
//! (unless that one is already labelled) and retargets every jump that
//! named the placeholder's label to whatever label the successor ends up
//! with. After folding no placeholder remains and every retargeted jump
//! names a real instruction.

use tracing::debug;

use crate::ast::Instruction;

/// Remove all placeholders from `raw`, rewiring labels and jump targets.
///
/// Folding an already folded sequence returns it unchanged. A placeholder
/// with no successor simply disappears; its label is still bound to the end
/// of the program by [`label_bindings`].
pub fn fold_placeholders(raw: Vec<Instruction>) -> Vec<Instruction> {
    let mut instructions = raw;
    let mut i = 0;
    while i < instructions.len() {
        if !instructions[i].op.is_placeholder() {
            i += 1;
            continue;
        }

        let removed = instructions.remove(i);
        let Some(label) = removed.label else {
            continue;
        };
        let Some(next) = instructions.get_mut(i) else {
            continue;
        };

        let bound = next.label.get_or_insert_with(|| label.clone()).clone();
        if bound != label {
            debug!(from = %label, to = %bound, "retargeting jumps to folded label");
            retarget(&mut instructions, &label, &bound);
        }
    }
    instructions
}

/// Point every jump aimed at `from` at `to` instead.
fn retarget(instructions: &mut [Instruction], from: &str, to: &str) {
    for instr in instructions.iter_mut() {
        if let Some(target) = instr.op.target_mut() {
            if target == from {
                *target = to.to_string();
            }
        }
    }
}

/// Every label in `raw` with the index it resolves to once folded.
///
/// A placeholder's label resolves to the next real instruction, or to the
/// end of the program (`len`) when none follows. Labels appear in definition
/// order and may repeat.
pub fn label_bindings(raw: &[Instruction]) -> Vec<(String, usize)> {
    let mut bindings = Vec::new();
    let mut real = 0;
    for instr in raw {
        if let Some(label) = &instr.label {
            bindings.push((label.clone(), real));
        }
        if !instr.op.is_placeholder() {
            real += 1;
        }
    }
    bindings
}
