use std::net::TcpStream;
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::thread::sleep;
use std::time::{Duration, Instant};

use serde_json::Value;
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "BOOKSHELF_URL",
    "BOOKSHELF_TOKEN",
    "BOOKSHELF_PASSWORD",
    "BOOKSHELF_DATA_DIR",
    "BOOKSHELF_DATABASE_URL",
    "BOOKSHELF_BIND_ADDRESS",
    "BOOKSHELF_TOKEN_SECRET",
    "BOOKSHELF_TOKEN_TTL_HOURS",
    "BOOKSHELF_ALLOWED_ORIGIN",
];

fn command(workdir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_bookshelf"));
    command.current_dir(workdir).env("RUST_LOG", "warn");
    for var in ENV_VARS {
        command.env_remove(var);
    }
    command
}

/// A `bookshelf serve` process on a free port with its own database file.
/// The process is killed when dropped.
pub struct TestServer {
    pub url: String,
    workdir: TempDir,
    child: Child,
}

impl TestServer {
    pub fn start() -> Self {
        let workdir = tempfile::tempdir().expect("failed to create temp dir");
        let port = portpicker::pick_unused_port().expect("no free port");
        let database_url = format!("sqlite://{}", workdir.path().join("bookshelf.db").display());

        let child = command(workdir.path())
            .arg("serve")
            .env("BOOKSHELF_BIND_ADDRESS", format!("127.0.0.1:{port}"))
            .env("BOOKSHELF_DATABASE_URL", database_url)
            .env("BOOKSHELF_TOKEN_SECRET", "cli-test-secret")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("failed to start server");

        let deadline = Instant::now() + Duration::from_secs(15);
        while TcpStream::connect(("127.0.0.1", port)).is_err() {
            assert!(Instant::now() < deadline, "server did not start on port {port}");
            sleep(Duration::from_millis(50));
        }

        Self {
            url: format!("http://127.0.0.1:{port}"),
            workdir,
            child,
        }
    }

    /// Run a CLI command against this server.
    pub fn run(&self, args: &[&str], envs: &[(&str, &str)]) -> Output {
        let mut command = command(self.workdir.path());
        command.env("BOOKSHELF_URL", &self.url).args(args);
        for (key, value) in envs {
            command.env(key, value);
        }
        command.output().expect("failed to run bookshelf")
    }

    /// Register `email` and return its bearer token.
    pub fn register(&self, email: &str) -> String {
        let output = self.run(
            &["register", "--email", email, "--password", "secret-pw"],
            &[],
        );
        assert_success(&output, "register");
        stdout_json(&output)["token"]
            .as_str()
            .expect("register should print a token")
            .to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Run a demo-mode command with its library stored in `data_dir`.
pub fn run_local(data_dir: &Path, args: &[&str]) -> Output {
    command(data_dir)
        .arg("local")
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .output()
        .expect("failed to run bookshelf")
}

pub fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{what} should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

pub fn stdout_json(output: &Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid JSON ({e}): {stdout}"))
}
