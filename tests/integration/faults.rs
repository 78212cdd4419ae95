//! Integration tests for runtime faults and run scoring.
//!
//! Component: VM + Runtime
//!
//! These tests verify:
//! - Every runtime error aborts the run with its message
//! - Step counts stop at the faulting instruction
//! - Direct and indirect addressing checks, negative indices included
//! - Fail (clean halt, expectations unmet) is kept apart from Error
//! - Reports keep the full input and output for diagnostics

#![cfg(test)]

use crate::common::*;

use mailroom::*;

// =============================================================================
// Output Contract
// =============================================================================

mod output_contract {
    use super::*;

    #[test]
    fn outbox_with_nothing_expected() {
        // Arrange & Act
        let report = run_source("INBOX\nOUTBOX\n", 0, ints(&[1]), Vec::new());

        // Assert: output unchanged, only INBOX counted
        assert_error(&report, "nothing left to output");
        assert!(report.output.is_empty());
        assert_eq!(report.step_count, 1);
    }

    #[test]
    fn outbox_with_empty_register() {
        let report = run_source("OUTBOX\n", 0, Vec::new(), ints(&[1]));

        assert_error(&report, "no data to output");
        assert_eq!(report.step_count, 0);
    }

    #[test]
    fn wrong_value_names_both_sides() {
        let report = run_source("a:\nINBOX\nOUTBOX\nJUMP a\n", 0, ints(&[1, 5]), ints(&[1, 2]));

        assert_error(&report, "expected to output 2, not 5");
        assert_eq!(report.output, ints(&[1]));
        assert_eq!(report.input, ints(&[1, 5]));
    }

    #[test]
    fn character_never_matches_its_code() {
        let report = run_source("INBOX\nOUTBOX\n", 0, values("A"), ints(&[65]));

        assert_error(&report, "expected to output 65, not A");
    }
}

// =============================================================================
// Scoring
// =============================================================================

mod scoring {
    use super::*;

    #[test]
    fn running_off_the_end_with_work_left_is_a_fail() {
        let report = run_echoing("INBOX\nOUTBOX\n", ints(&[1, 2]));

        assert_eq!(report.status, RunStatus::Fail);
        assert_eq!(report.message.as_deref(), Some("1 expected values were never output"));
        assert_eq!(report.output, ints(&[1]));
        assert_eq!(report.step_count, 2);
    }

    #[test]
    fn unread_input_does_not_fail_a_run() {
        let report = run_source("INBOX\nOUTBOX\n", 0, ints(&[1, 2, 3]), ints(&[1]));

        assert_success(&report, &ints(&[1]));
    }

    #[test]
    fn empty_program() {
        let puzzle = FixedPuzzle::new("empty", 0, Vec::new(), Vec::new());

        let report = run(&puzzle, &Program::empty(), Vec::new());

        assert_success(&report, &[]);
        assert_eq!(report.instruction_count, 0);
    }

    #[test]
    fn jump_to_trailing_label_ends_the_run() {
        let report = run_source("INBOX\nJUMP done\nOUTBOX\ndone:\n", 0, ints(&[1]), Vec::new());

        assert_success(&report, &[]);
        assert_eq!(report.step_count, 2);
        assert_eq!(report.instruction_count, 3);
    }
}

// =============================================================================
// Jumps
// =============================================================================

mod jumps {
    use super::*;

    #[test]
    fn missing_target_fails_only_when_taken() {
        // Arrange: JUMPZ is skipped for 1 and taken for 0
        let source = "a:\nINBOX\nJUMPZ nowhere\nOUTBOX\nJUMP a\n";

        // Act
        let report = run_source(source, 0, ints(&[1, 0]), ints(&[1]));

        // Assert: INBOX, OUTBOX, JUMP, INBOX, then the taken JUMPZ
        assert_error(&report, "invalid jump target `nowhere`");
        assert_eq!(report.step_count, 5);
        assert_eq!(report.output, ints(&[1]));
    }

    #[test]
    fn conditional_jump_on_empty_register() {
        let report = run_source("JUMPN a\na:\n", 0, Vec::new(), Vec::new());

        assert_error(&report, "nothing to compare for JUMPN");
    }

    #[test]
    fn characters_are_neither_zero_nor_negative() {
        let source = "\
            INBOX
            JUMPZ skip
            JUMPN skip
            OUTBOX
            skip:
        ";

        let report = run_source(source, 0, values("A"), values("A"));

        assert_success(&report, &values("A"));
        assert_eq!(report.step_count, 2);
    }
}

// =============================================================================
// Addressing
// =============================================================================

mod addressing {
    use super::*;

    #[test]
    fn out_of_range_read_leaves_register_alone() {
        // Arrange
        let program = program("INBOX\nCOPYFROM 5\n");
        let mut session = Session::new(1, ints(&[7]), Vec::new());
        let mut executor = Executor::new(&program);

        // Act
        let result = executor.run(&mut session);

        // Assert
        assert_eq!(result, Err(MailroomError::InvalidAddress { index: 5 }));
        assert_eq!(session.register(), Value::Integer(7));
        assert_eq!(executor.steps(), 1);
    }

    #[test]
    fn out_of_range_message_names_the_index() {
        let report = run_source("INBOX\nCOPYFROM 5\n", 1, ints(&[7]), Vec::new());

        assert_error(&report, "attempted to access nonexistent memory address 5");
    }

    #[test]
    fn negative_direct_index() {
        let report = run_source("INBOX\nCOPYTO -1\n", 3, ints(&[7]), Vec::new());

        assert_error(&report, "attempted to access nonexistent memory address -1");
    }

    #[test]
    fn indirect_copy_through_pointer() {
        // Arrange: cell 0 holds 2, so [0] names cell 2
        let source = "\
            INBOX
            COPYTO 0
            INBOX
            COPYTO [0]
            COPYFROM 2
            OUTBOX
        ";

        // Act
        let report = run_source(source, 3, ints(&[2, 9]), ints(&[9]));

        // Assert
        assert_success(&report, &ints(&[9]));
        assert_eq!(report.step_count, 6);
    }

    #[test]
    fn pointer_cell_out_of_range() {
        let report = run_source("INBOX\nCOPYFROM [3]\n", 2, ints(&[1]), Vec::new());

        assert_error(&report, "attempted to read a pointer from nonexistent memory address 3");
    }

    #[test]
    fn pointer_cell_without_integer() {
        let report = run_source("INBOX\nCOPYTO 0\nCOPYFROM [0]\n", 2, values("A"), Vec::new());

        assert_error(&report, "memory cell 0 holds no integer to use as an address");
    }

    #[test]
    fn negative_pointer_target() {
        let report = run_source("INBOX\nCOPYTO 0\nCOPYFROM [0]\n", 2, ints(&[-1]), Vec::new());

        assert_error(&report, "pointer in memory cell 0 refers to nonexistent memory address -1");
    }

    #[test]
    fn pointer_past_the_end() {
        let report = run_source("INBOX\nCOPYTO 0\nBUMPUP [0]\n", 2, ints(&[2]), Vec::new());

        assert_error(&report, "pointer in memory cell 0 refers to nonexistent memory address 2");
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

mod arithmetic {
    use super::*;

    #[test]
    fn add_and_sub_keep_memory() {
        let source = "\
            INBOX
            COPYTO 0
            INBOX
            SUB 0
            OUTBOX
            ADD 0
            ADD 0
            OUTBOX
            COPYFROM 0
            OUTBOX
        ";

        let report = run_source(source, 1, ints(&[3, 10]), ints(&[7, 13, 3]));

        assert_success(&report, &ints(&[7, 13, 3]));
    }

    #[test]
    fn character_register_in_addition() {
        let source = "INBOX\nCOPYTO 0\nINBOX\nADD 0\n";

        let report = run_source(source, 1, values("5, A"), Vec::new());

        assert_error(&report, "the register holds no integer for addition");
    }

    #[test]
    fn empty_cell_in_subtraction() {
        let report = run_source("INBOX\nSUB 0\n", 1, ints(&[5]), Vec::new());

        assert_error(&report, "memory cell 0 holds no integer for subtraction");
    }

    #[test]
    fn bump_on_empty_cell() {
        let report = run_source("BUMPDN 0\n", 1, Vec::new(), Vec::new());

        assert_error(&report, "memory cell 0 holds no integer for decrement");
    }

    #[test]
    fn bump_updates_cell_and_register() {
        let source = "\
            INBOX
            COPYTO 0
            BUMPUP 0
            BUMPUP 0
            OUTBOX
            COPYFROM 0
            OUTBOX
        ";

        let report = run_source(source, 1, ints(&[1]), ints(&[3, 3]));

        assert_success(&report, &ints(&[3, 3]));
    }

    #[test]
    fn overflow_is_an_error() {
        let report = run_source("INBOX\nCOPYTO 0\nBUMPUP 0\n", 1, ints(&[i64::MAX]), Vec::new());

        assert_error(&report, "increment overflowed");
        assert_eq!(report.step_count, 2);
    }

    #[test]
    fn copying_an_empty_register_is_allowed() {
        let report = run_source("COPYTO 0\nCOPYFROM 0\nOUTBOX\n", 1, Vec::new(), ints(&[1]));

        assert_error(&report, "no data to output");
        assert_eq!(report.step_count, 2);
    }
}
