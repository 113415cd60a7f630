#[cfg(test)]
mod cli_tests {
    use std::fs;
    use std::path::PathBuf;
    use std::process::{Command, Output};

    use pretty_assertions::assert_eq;

    /// Write `source` to a scratch file and run `lox-syntax <args…> <file>`.
    fn run(name: &str, args: &[&str], source: &str) -> Output {
        let dir: PathBuf = std::env::temp_dir().join(format!(
            "lox-syntax-cli-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();

        let file = dir.join("input.lox");
        fs::write(&file, source).unwrap();

        let output = Command::new(env!("CARGO_BIN_EXE_lox-syntax"))
            .env_remove("RUST_LOG")
            .args(args)
            .arg(&file)
            .output()
            .unwrap();

        fs::remove_dir_all(&dir).unwrap();

        output
    }

    fn stdout(output: &Output) -> String {
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    fn stderr(output: &Output) -> String {
        String::from_utf8_lossy(&output.stderr).into_owned()
    }

    #[test]
    fn test_parse_prints_ast() {
        let output = run("parse", &["parse"], "1 + 2 * 3\n");

        assert_eq!(output.status.code(), Some(0));
        assert_eq!(stdout(&output), "(+ 1 (* 2 3))\n");
        assert_eq!(stderr(&output), "");
    }

    #[test]
    fn test_parse_error_is_reported_with_exit_65() {
        let output = run("parse-empty", &["parse"], "");

        assert_eq!(output.status.code(), Some(65));
        assert_eq!(stdout(&output), "");
        assert_eq!(
            stderr(&output),
            "[line 1] Error at end: Expect expression.\n"
        );
    }

    #[test]
    fn test_lex_error_exits_65() {
        let output = run("parse-lex", &["parse"], "1 + $");

        assert_eq!(output.status.code(), Some(65));
        assert_eq!(
            stderr(&output),
            "[line 1] Error: Unexpected character: $\n"
        );
    }

    #[test]
    fn test_trailing_tokens_rejected_by_default() {
        let output = run("trailing", &["parse"], "1 + 2 )");

        assert_eq!(output.status.code(), Some(65));
        assert_eq!(
            stderr(&output),
            "[line 1] Error at ')': Expect end of expression.\n"
        );
    }

    #[test]
    fn test_allow_trailing() {
        let output = run("allow-trailing", &["parse", "--allow-trailing"], "1 + 2 )");

        assert_eq!(output.status.code(), Some(0));
        assert_eq!(stdout(&output), "(+ 1 2)\n");
    }

    #[test]
    fn test_parse_json() {
        let output = run("json", &["parse", "--json"], "-2");

        assert_eq!(output.status.code(), Some(0));

        let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();

        assert_eq!(json["kind"], "Unary");
        assert_eq!(json["operator"]["lexeme"], "-");
        assert_eq!(json["right"]["value"]["Number"], 2.0);
    }

    #[test]
    fn test_format() {
        let output = run("format", &["format"], "(1+2)*-3 != \"x\"");

        assert_eq!(output.status.code(), Some(0));
        assert_eq!(stdout(&output), "(1 + 2) * -3 != \"x\"\n");
    }

    #[test]
    fn test_tokenize() {
        let output = run("tokenize", &["tokenize"], "(1 +\n\"a\"");

        assert_eq!(output.status.code(), Some(0));
        assert_eq!(
            stdout(&output),
            "LEFT_PAREN ( null\nNUMBER 1 1.0\nPLUS + null\nSTRING \"a\" a\nEOF  null\n"
        );
    }

    #[test]
    fn test_tokenize_error_exits_65_after_printing_tokens() {
        let output = run("tokenize-err", &["tokenize"], "1 #");

        assert_eq!(output.status.code(), Some(65));
        assert_eq!(stdout(&output), "NUMBER 1 1.0\nEOF  null\n");
        assert_eq!(
            stderr(&output),
            "[line 1] Error: Unexpected character: #\n"
        );
    }

    #[test]
    fn test_missing_filename() {
        for command in ["tokenize", "parse", "format"] {
            let output = Command::new(env!("CARGO_BIN_EXE_lox-syntax"))
                .env_remove("RUST_LOG")
                .arg(command)
                .output()
                .unwrap();

            assert_eq!(output.status.code(), Some(0), "{}", command);
            assert_eq!(
                stdout(&output),
                "No input filepath was provided. Exiting...\n"
            );
        }
    }

    #[test]
    fn test_missing_file_fails() {
        let output = Command::new(env!("CARGO_BIN_EXE_lox-syntax"))
            .env_remove("RUST_LOG")
            .args(["parse", "/nonexistent/lox-syntax/input.lox"])
            .output()
            .unwrap();

        assert!(!output.status.success());
        assert!(stderr(&output).contains("Failed to open file"));
    }
}
