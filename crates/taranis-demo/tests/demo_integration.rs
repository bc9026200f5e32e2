use std::process::{Command, Output};

fn demo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_taranis-demo"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run taranis-demo")
}

fn stdout_of(out: &Output) -> String {
    assert!(
        out.status.success(),
        "taranis-demo failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn help_prints_and_exits() {
    let stdout = stdout_of(&demo(&["--help"]));
    assert!(
        stdout.starts_with("My Cool App - Version 1.2.3.4-abc\n"),
        "unexpected help output:\n{stdout}"
    );
    assert!(stdout.contains("Shows what taranis made of the command line.\n\n"));
    assert!(stdout.contains("  -m, --mouse\tForce mouse to be displayed in release build.\n"));
    assert!(stdout.contains("  -g, --greet\tGreet someone.\n"));
    assert!(!stdout.contains("Show Mouse?"), "help must exit before the host continues");

    let short = stdout_of(&demo(&["-?"]));
    assert_eq!(short, stdout);
}

#[test]
fn version_prints_title_and_exits() {
    let stdout = stdout_of(&demo(&["-V"]));
    assert_eq!(stdout, "My Cool App - Version 1.2.3.4-abc\n");
}

#[test]
fn defaults_without_arguments() {
    let stdout = stdout_of(&demo(&[]));
    assert_eq!(stdout, "Show Mouse? No\nRemote: 1.2.3.4\n");
}

#[test]
fn flags_values_and_actions() {
    let stdout = stdout_of(&demo(&[
        "stray",
        "--MOUSE",
        "--remote",
        "192.168.228.64",
        "-g=Ada",
        "--greet",
        "--unknown",
    ]));
    assert_eq!(
        stdout,
        "Show Mouse? Yes\nRemote: 192.168.228.64\nHello, Ada!\nHello, world!\n"
    );
}
