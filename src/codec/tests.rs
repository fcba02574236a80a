//! Unit and generated checks for RESP multibulk encoding.

use bytes::Bytes;
use proptest::{
    collection::vec,
    prelude::any,
    prop_assert_eq,
    test_runner::{Config as ProptestConfig, RngAlgorithm, TestCaseError, TestRng, TestRunner},
};
use rstest::rstest;

use super::Command;
use crate::arg::{Arg, EncodeError};

fn deterministic_runner(cases: u32) -> TestRunner {
    let config = ProptestConfig {
        cases,
        ..ProptestConfig::default()
    };
    let rng = TestRng::deterministic_rng(RngAlgorithm::ChaCha);
    TestRunner::new_with_rng(config, rng)
}

#[test]
fn encodes_set_command_to_canonical_frame() {
    let frame = Command::new("SET")
        .arg("foo")
        .arg("bar")
        .encode()
        .expect("encode SET");
    assert_eq!(frame.as_bytes(), b"*3\r\n$3\r\nSET\r\n$3\r\nfoo\r\n$3\r\nbar\r\n");
}

#[test]
fn empty_command_encodes_to_bare_header() {
    let frame = Command::empty().encode().expect("encode empty");
    assert_eq!(frame.as_bytes(), b"*0\r\n");
}

#[test]
fn declared_lengths_count_bytes_not_characters() {
    // "clé" is three characters but four bytes.
    let frame = Command::new("SET")
        .arg("cl\u{e9}")
        .arg("v")
        .encode()
        .expect("encode multi-byte");
    assert_eq!(
        frame.as_bytes(),
        b"*3\r\n$3\r\nSET\r\n$4\r\ncl\xc3\xa9\r\n$1\r\nv\r\n"
    );
}

#[rstest]
#[case(Arg::Int(42), b"42".as_slice())]
#[case(Arg::Int(-7), b"-7".as_slice())]
#[case(Arg::Symbol("ok"), b"ok".as_slice())]
#[case(Arg::Blob(Bytes::from_static(b"\x00\xff")), b"\x00\xff".as_slice())]
fn segment_payload_matches_coerced_argument(#[case] arg: Arg, #[case] payload: &[u8]) {
    let frame = Command::empty().arg(arg).encode().expect("encode");
    let mut expected = format!("*1\r\n${}\r\n", payload.len()).into_bytes();
    expected.extend_from_slice(payload);
    expected.extend_from_slice(b"\r\n");
    assert_eq!(frame.as_bytes(), expected.as_slice());
}

#[test]
fn float_argument_aborts_encoding() {
    let err = Command::new("SET")
        .arg("pi")
        .arg(3.25f64)
        .encode()
        .expect_err("float must abort");
    assert!(matches!(err, EncodeError::UnsupportedFloat(value) if value == 3.25));
}

#[rstest]
#[case(64, 128)]
#[case(200, 96)]
fn generated_commands_match_reference_assembly(#[case] max_payload: usize, #[case] cases: u32) {
    let mut runner = deterministic_runner(cases);
    let strategy = vec(vec(any::<u8>(), 0..max_payload), 0..12);

    runner
        .run(&strategy, |payloads| {
            let command: Command = payloads.iter().cloned().collect();
            let frame = command
                .encode()
                .map_err(|err| TestCaseError::fail(format!("encode failed: {err}")))?;

            let mut expected = format!("*{}\r\n", payloads.len()).into_bytes();
            for payload in &payloads {
                expected.extend_from_slice(format!("${}\r\n", payload.len()).as_bytes());
                expected.extend_from_slice(payload);
                expected.extend_from_slice(b"\r\n");
            }

            prop_assert_eq!(frame.as_bytes(), expected.as_slice());
            Ok(())
        })
        .expect("generated commands should encode to reference frames");
}
