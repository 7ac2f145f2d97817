use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn td_help_works() {
    Command::cargo_bin("td")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("taskdeck"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = [
        "init", "login", "register", "logout", "whoami", "task", "project", "stats", "data",
    ];

    for cmd in subcommands {
        Command::cargo_bin("td")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}
