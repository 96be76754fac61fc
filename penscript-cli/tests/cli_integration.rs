use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new(tag: &str) -> Self {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let path = std::env::temp_dir().join(format!(
            "penscript_cli_{tag}_{}_{}",
            std::process::id(),
            ts
        ));
        fs::create_dir_all(&path).expect("create temp test dir");
        Self { path }
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn command(args: &[&str], cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_penscript"));
    cmd.args(args).current_dir(cwd).env_remove("RUST_LOG");
    cmd
}

fn run_penscript(args: &[&str], cwd: &Path) -> Output {
    command(args, cwd).output().expect("run penscript")
}

#[test]
fn eval_writes_output_svg() {
    let dir = TestDir::new("eval");
    let output = run_penscript(&["-e", "moveto 10 10\ndrawto 50 50"], &dir.path);

    assert!(output.status.success(), "process failed: {output:?}");
    let svg = fs::read_to_string(dir.path.join("output.svg")).expect("read svg output");
    assert!(svg.contains("<svg"), "expected svg root element");
    assert!(svg.contains("M10,10L50,50"), "expected the line: {svg}");
}

#[test]
fn file_input_writes_svg_to_output_dir() {
    let dir = TestDir::new("file_svg");
    fs::write(
        dir.path.join("house.pen"),
        "pen red\nmoveto 10 40\nrectangle 40 30\ntriangle 50 20 50 40\n",
    )
    .expect("write sample script");

    let out_dir = dir.path.join("out");
    fs::create_dir_all(&out_dir).expect("create output dir");

    let output = run_penscript(&["house.pen", "-o", "out"], &dir.path);
    assert!(output.status.success(), "process failed: {output:?}");

    let svg_path = out_dir.join("house.svg");
    assert!(svg_path.is_file(), "expected output file at {svg_path:?}");
    let svg = fs::read_to_string(svg_path).expect("read svg output");
    assert!(svg.contains("fill=\"#ff0000\""), "expected red fill: {svg}");
    assert!(svg.contains("path"), "expected rendered path element");
}

#[test]
fn errors_are_reported_with_line_numbers() {
    let dir = TestDir::new("errors");
    let output = run_penscript(&["-e", "moveto 1 1\nwibble\ndrawto 5 5"], &dir.path);

    assert_eq!(output.status.code(), Some(1), "expected failure: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: line 2:"),
        "expected diagnostic for line 2, got: {stderr}"
    );
    // Lines after the failure still ran.
    let svg = fs::read_to_string(dir.path.join("output.svg")).expect("read svg output");
    assert!(svg.contains("M1,1L5,5"), "expected the line: {svg}");
}

#[test]
fn halt_on_error_stops_at_first_failure() {
    let dir = TestDir::new("halt");
    let output = run_penscript(
        &["--halt-on-error", "-e", "bogus\nmoveto 1 1\ndrawto 5 5"],
        &dir.path,
    );

    assert_eq!(output.status.code(), Some(1));
    let svg = fs::read_to_string(dir.path.join("output.svg")).expect("read svg output");
    assert!(!svg.contains("M1,1L5,5"), "later lines should not run: {svg}");
}

#[test]
fn max_loop_count_is_enforced() {
    let dir = TestDir::new("loop_cap");
    let output = run_penscript(
        &["--max-loop-count", "2", "-e", "loop 3\ndrawto 1 1\nendloop"],
        &dir.path,
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceeds the limit"), "got: {stderr}");
}

#[test]
fn canvas_size_sets_view_box() {
    let dir = TestDir::new("canvas");
    let output = run_penscript(
        &["--width", "640", "--height", "480", "-e", "circle 20"],
        &dir.path,
    );

    assert!(output.status.success(), "process failed: {output:?}");
    let svg = fs::read_to_string(dir.path.join("output.svg")).expect("read svg output");
    assert!(svg.contains("viewBox=\"0 0 640 480\""), "got: {svg}");
}

#[test]
fn interactive_reads_stdin() {
    let dir = TestDir::new("interactive");
    let mut child = command(&["-i"], &dir.path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn penscript");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"x = 20\nmoveto x x\nnope 1\ndrawto 30 30\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait for penscript");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: line 3:"), "got: {stderr}");
    let svg = fs::read_to_string(dir.path.join("output.svg")).expect("read svg output");
    assert!(svg.contains("M20,20L30,30"), "got: {svg}");
}

#[test]
fn missing_file_fails() {
    let dir = TestDir::new("missing");
    let output = run_penscript(&["nowhere.pen"], &dir.path);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error reading nowhere.pen"), "got: {stderr}");
}
