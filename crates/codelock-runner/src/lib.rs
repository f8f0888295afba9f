//! # codelock-runner
//!
//! Harness for the Dongle Lock protocol engine. The `codelock` binary's
//! `serve` command hosts the virtual device behind a TCP listener — the
//! dongle's serial link, one peer at a time — while `get`/`set` run
//! one-shot client sessions against a served dongle.

pub mod bridge;
