/// Binary entrypoint for the `agentctl` executable.
///
/// Keeps the binary thin — all business logic lives in the `agentctl_lib`
/// crate so unit tests can import library functions directly.
fn main() {
    agentctl_lib::run();
}
