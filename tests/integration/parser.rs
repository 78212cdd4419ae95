//! Integration tests for program text.
//!
//! Component: Parser (with folding and the label table)
//!
//! These tests verify:
//! - Game-style listings with comments and metadata blocks
//! - All-or-nothing rejection of malformed text
//! - Label folding and duplicate label detection
//! - Canonical serialization

#![cfg(test)]

use crate::common::*;

use mailroom::*;

// =============================================================================
// Accepted Text
// =============================================================================

mod accepted {
    use super::*;

    #[test]
    fn listing_with_metadata_and_comments() {
        // Arrange
        let source = "\
-- MAILROOM PROGRAM --
-- echo every value

a:
    inbox   -- take one
    Outbox
    JUMP     a


DEFINE LABEL 0
eJxzYmBg+M/AwMDEBAA=
kx0QBlLXRAhIE;
";

        // Act
        let program = program(source);

        // Assert
        assert_eq!(program.instruction_count(), 3);
        assert_eq!(program.resolve("a"), Some(0));
        assert_eq!(program.instructions()[0].op, Op::Input);
        assert_eq!(program.instructions()[1].op, Op::Output);
    }

    #[test]
    fn metadata_keyword_glued_to_its_payload() {
        let program = program("INBOX\nDEFINE;\ndefine:COMMENT 0\nabc;\nOUTBOX\n");

        assert_eq!(program.instruction_count(), 2);
    }

    #[test]
    fn stacked_labels_share_an_instruction() {
        let program = program("a:\nb:\n    INBOX\n    JUMP a\n    JUMP b\n");

        // Jumps to the folded alias now name the surviving label
        assert_eq!(program.resolve("a"), Some(0));
        assert_eq!(program.resolve("b"), Some(0));
        assert_eq!(program.instructions()[0].label.as_deref(), Some("b"));
        assert_eq!(program.instructions()[1].op, Op::Jump("b".into()));
        assert_eq!(program.instructions()[2].op, Op::Jump("b".into()));
    }

    #[test]
    fn indirect_operands() {
        let program = program("COPYFROM [4]\nbumpdn [2]\nADD 3\n");

        assert_eq!(program.instructions()[0].op, Op::CopyFrom(Address::indirect(4)));
        assert_eq!(program.instructions()[1].op, Op::BumpDown(Address::indirect(2)));
        assert_eq!(program.instructions()[2].op, Op::Add(Address::direct(3)));
    }

    #[test]
    fn undefined_jump_targets_are_not_checked_when_parsing() {
        assert!(try_program("JUMP nowhere\n").is_ok());
    }
}

// =============================================================================
// Rejected Text
// =============================================================================

mod rejected {
    use super::*;

    fn parse_error(source: &str) -> ParseError {
        match parse(source) {
            Err(MailroomError::Parse(err)) => err,
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn unknown_mnemonic() {
        assert_eq!(
            parse_error("INBOX\nMULTIPLY 2\nOUTBOX\n"),
            ParseError::UnknownMnemonic("MULTIPLY".into())
        );
    }

    #[test]
    fn missing_and_extra_operands() {
        assert_eq!(parse_error("COPYTO\n"), ParseError::MissingOperand("COPYTO".into()));
        assert_eq!(
            parse_error("inbox 1\n"),
            ParseError::UnexpectedOperand { mnemonic: "INBOX".into(), operand: "1".into() }
        );
        assert_eq!(
            parse_error("ADD 1 2\n"),
            ParseError::UnexpectedOperand { mnemonic: "ADD".into(), operand: "2".into() }
        );
    }

    #[test]
    fn bad_operands() {
        assert_eq!(parse_error("COPYTO x\n"), ParseError::InvalidOperand("x".into()));
        assert_eq!(parse_error("COPYTO [x]\n"), ParseError::InvalidOperand("[x]".into()));
        assert_eq!(parse_error("COPYTO [3\n"), ParseError::InvalidOperand("[3".into()));
        assert_eq!(parse_error("JUMP [3]\n"), ParseError::InvalidLabel("[3]".into()));
    }

    #[test]
    fn bad_label_line() {
        assert_eq!(parse_error("my label:\nINBOX\n"), ParseError::InvalidLabel("my label".into()));
    }

    #[test]
    fn unterminated_metadata() {
        assert_eq!(
            parse_error("INBOX\nDEFINE COMMENT 0\nabc\n"),
            ParseError::UnterminatedMetadata("DEFINE COMMENT 0".into())
        );
    }

    #[test]
    fn one_bad_line_rejects_everything() {
        let err = try_program("a:\nINBOX\nOUTBOX\nJUMP a\nHALT\n").unwrap_err();

        assert_eq!(err, "parse error: unknown instruction `HALT`");
    }

    #[test]
    fn duplicate_labels() {
        let err = parse("a:\nINBOX\na:\nOUTBOX\n").unwrap_err();

        assert_eq!(err, MailroomError::DuplicateLabel { label: "a".into() });
        assert_eq!(err.category(), ErrorCategory::Build);
    }

    #[test]
    fn duplicate_labels_from_the_builder() {
        let err = ProgramBuilder::new()
            .input()
            .with_label("x")
            .label("x")
            .output()
            .build()
            .unwrap_err();

        assert_eq!(err, MailroomError::DuplicateLabel { label: "x".into() });
    }
}

// =============================================================================
// Canonical Form
// =============================================================================

mod canonical_form {
    use super::*;

    #[test]
    fn serializes_with_header_labels_and_comments() {
        // Arrange
        let program = ProgramBuilder::new()
            .input()
            .with_label("top")
            .with_comment("read")
            .copy_to(Address::indirect(1))
            .jump_if_negative("top")
            .label("end")
            .build()
            .expect("program builds");

        // Act
        let text = serialize(&program);

        // Assert
        assert_eq!(
            text,
            "-- MAILROOM PROGRAM --\ntop:\n-- read\n\tINBOX\n\tCOPYTO\t[1]\n\tJUMPN\ttop\nend:"
        );
    }

    #[test]
    fn built_labels_outside_ascii_parse_back() {
        // Arrange
        let program = ProgramBuilder::new()
            .input()
            .with_label("début")
            .jump_if_zero("fin-1")
            .output()
            .jump("début")
            .label("fin-1")
            .build()
            .expect("program builds");

        // Act
        let reparsed = parse(&serialize(&program));

        // Assert
        assert_eq!(reparsed, Ok(program));
    }

    #[test]
    fn builder_rejects_labels_text_cannot_carry() {
        let err = ProgramBuilder::new().input().with_label("two words").build().unwrap_err();

        assert_eq!(err, MailroomError::Parse(ParseError::InvalidLabel("two words".into())));
    }

    #[test]
    fn canonical_form_is_stable() {
        let source = "b:\n  inbox\n  jumpz b\n  copyto 2\nc:\n";
        let once = serialize(&program(source));

        let twice = serialize(&program(&once));

        assert_eq!(once, twice);
    }

    #[test]
    fn display_matches_serialize() {
        let program: Program = "a:\nINBOX\nJUMP a\n".parse().expect("parses");

        assert_eq!(program.to_string(), serialize(&program));
    }
}
