//! End-to-end engine scenarios over a scripted transport.
//!
//! Each test feeds a canned byte sequence into the engine and checks the
//! exact bytes it puts on the wire.

use codelock_engine::{Engine, ScriptTransport, SessionState, TransportError};
use codelock_protocol::{MAX_CODE_LENGTH, MAX_LINE_LENGTH};

/// Run the engine over `input` until the script runs dry, returning
/// everything it transmitted.
fn run_script(input: &[u8]) -> Vec<u8> {
    let mut transport = ScriptTransport::new(input);
    let mut engine = Engine::new();
    assert_eq!(
        engine.run(&mut transport).unwrap_err(),
        TransportError::Closed
    );
    transport.transmitted().to_vec()
}

#[test]
fn test_end_to_end_session() {
    let output = run_script(b"CONNECT\nSET_CODE_1:abc123\nGET_CODE_1\nDISCONNECT\nGET_CODE_1\n");
    assert_eq!(output, b"OK\r\nSAVED\r\nCODE:abc123\nOK\r\nERROR\r\n".to_vec());
}

#[test]
fn test_everything_rejected_before_connect() {
    let output = run_script(b"GET_CODE_1\nSET_CODE_2:x\nDISCONNECT\nnonsense\n");
    assert_eq!(output, b"ERROR\r\nERROR\r\nERROR\r\nERROR\r\n".to_vec());
}

#[test]
fn test_crlf_input_accepted() {
    let output = run_script(b"CONNECT\r\nGET_CODE_1\r\n");
    assert_eq!(output, b"OK\r\nNOT_FOUND\r\n".to_vec());
}

#[test]
fn test_carriage_return_inside_line_ignored() {
    let output = run_script(b"CON\rNECT\n");
    assert_eq!(output, b"OK\r\n".to_vec());
}

#[test]
fn test_idempotent_reconnect_preserves_store() {
    let output = run_script(b"CONNECT\nSET_CODE_2:hello\nCONNECT\nGET_CODE_2\n");
    assert_eq!(output, b"OK\r\nSAVED\r\nOK\r\nCODE:hello\n".to_vec());
}

#[test]
fn test_store_survives_disconnect() {
    let output = run_script(b"CONNECT\nSET_CODE_3:keep\nDISCONNECT\nCONNECT\nGET_CODE_3\n");
    assert_eq!(output, b"OK\r\nSAVED\r\nOK\r\nOK\r\nCODE:keep\n".to_vec());
}

#[test]
fn test_invalid_indices_and_shapes() {
    let output = run_script(b"CONNECT\nGET_CODE_4\nGET_CODE_0\nGET_CODE_1X\nSET_CODE_1hello\n");
    assert_eq!(output, b"OK\r\nERROR\r\nERROR\r\nERROR\r\nERROR\r\n".to_vec());
}

#[test]
fn test_set_code_truncates_to_capacity() {
    let long = "z".repeat(MAX_CODE_LENGTH + 1);
    let input = format!("CONNECT\nSET_CODE_3:{}\nGET_CODE_3\n", long);
    let expected = format!("OK\r\nSAVED\r\nCODE:{}\n", &long[..MAX_CODE_LENGTH]);
    assert_eq!(run_script(input.as_bytes()), expected.into_bytes());
}

#[test]
fn test_overlong_line_spills_into_next_command() {
    // An input line of 130 bytes: the first 127 dispatch as one (malformed)
    // command, the 128th byte is dropped, and the final two bytes land as
    // the prefix of the next command line.
    let mut input = b"CONNECT\n".to_vec();
    input.extend(std::iter::repeat(b'A').take(MAX_LINE_LENGTH + 3));
    input.extend_from_slice(b"\nCONNECT\n");
    let output = run_script(&input);
    // CONNECT, 127xA (malformed), "AA" (malformed), CONNECT.
    assert_eq!(output, b"OK\r\nERROR\r\nERROR\r\nOK\r\n".to_vec());
}

#[test]
fn test_transport_closed_mid_line_transmits_nothing() {
    let mut transport = ScriptTransport::new(b"CONNEC");
    let mut engine = Engine::new();
    assert_eq!(
        engine.run(&mut transport).unwrap_err(),
        TransportError::Closed
    );
    assert!(transport.transmitted().is_empty());
}

#[test]
fn test_session_state_visible_to_harness() {
    let mut engine = Engine::new();
    assert_eq!(engine.session(), SessionState::Disconnected);
    engine.handle_line("CONNECT");
    assert_eq!(engine.session(), SessionState::Connected);
    engine.handle_line("DISCONNECT");
    assert_eq!(engine.session(), SessionState::Disconnected);
}
