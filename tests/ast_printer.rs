#[cfg(test)]
mod ast_printer_tests {
    use lox_syntax as lox;

    use lox::ast_printer::AstPrinter;
    use lox::expr::{Expr, Visitor};
    use lox::parser::Parser;
    use lox::reporter::CollectingReporter;
    use lox::scanner::scan_tokens;
    use lox::source_printer::SourcePrinter;
    use lox::token::{Token, TokenType};
    use lox::value::Literal;

    use pretty_assertions::assert_eq;

    fn op(token_type: TokenType, lexeme: &str) -> Token<'_> {
        Token::simple(token_type, lexeme, 1)
    }

    /// Records which handler ran, and how often.
    #[derive(Default)]
    struct DispatchLog {
        calls: Vec<&'static str>,
    }

    impl Visitor<&'static str> for DispatchLog {
        fn visit_binary(&mut self, _: &Expr<'_>, _: &Token<'_>, _: &Expr<'_>) -> &'static str {
            self.calls.push("binary");
            "B"
        }

        fn visit_grouping(&mut self, _: &Expr<'_>) -> &'static str {
            self.calls.push("grouping");
            "G"
        }

        fn visit_literal(&mut self, _: &Literal) -> &'static str {
            self.calls.push("literal");
            "L"
        }

        fn visit_unary(&mut self, _: &Token<'_>, _: &Expr<'_>) -> &'static str {
            self.calls.push("unary");
            "U"
        }
    }

    /// Counts nodes by walking children itself.
    struct NodeCount;

    impl Visitor<usize> for NodeCount {
        fn visit_binary(&mut self, left: &Expr<'_>, _: &Token<'_>, right: &Expr<'_>) -> usize {
            1 + left.accept(self) + right.accept(self)
        }

        fn visit_grouping(&mut self, expression: &Expr<'_>) -> usize {
            1 + expression.accept(self)
        }

        fn visit_literal(&mut self, _: &Literal) -> usize {
            1
        }

        fn visit_unary(&mut self, _: &Token<'_>, right: &Expr<'_>) -> usize {
            1 + right.accept(self)
        }
    }

    #[test]
    fn test_hand_built_tree() {
        let expr = Expr::binary(
            Expr::unary(op(TokenType::MINUS, "-"), Expr::literal(123.0)),
            op(TokenType::STAR, "*"),
            Expr::grouping(Expr::literal(45.67)),
        );

        assert_eq!(AstPrinter::print(&expr), "(* (- 123) (group 45.67))");
        assert_eq!(expr.to_string(), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn test_literal_forms() {
        assert_eq!(AstPrinter::print(&Expr::nil()), "nil");
        assert_eq!(AstPrinter::print(&Expr::literal("nil")), "nil");
        assert_eq!(AstPrinter::print(&Expr::literal("a b")), "a b");
        assert_eq!(AstPrinter::print(&Expr::literal(true)), "true");
        assert_eq!(AstPrinter::print(&Expr::literal(false)), "false");
        assert_eq!(AstPrinter::print(&Expr::literal(2.5)), 2.5f64.to_string());
        assert_eq!(AstPrinter::print(&Expr::literal(7.0)), 7f64.to_string());
    }

    #[test]
    fn test_dispatch_runs_exactly_one_handler() {
        let cases: Vec<(Expr<'_>, &str, &str)> = vec![
            (
                Expr::binary(Expr::nil(), op(TokenType::PLUS, "+"), Expr::nil()),
                "binary",
                "B",
            ),
            (Expr::grouping(Expr::nil()), "grouping", "G"),
            (Expr::literal(1.0), "literal", "L"),
            (Expr::unary(op(TokenType::BANG, "!"), Expr::nil()), "unary", "U"),
        ];

        for (expr, handler, result) in cases {
            let mut log = DispatchLog::default();

            assert_eq!(expr.accept(&mut log), result);
            assert_eq!(log.calls, vec![handler]);
        }
    }

    #[test]
    fn test_dispatch_through_trait_object() {
        let expr = Expr::grouping(Expr::literal(1.0));
        let mut counter = NodeCount;
        let visitor: &mut dyn Visitor<usize> = &mut counter;

        assert_eq!(expr.accept(visitor), 2);
    }

    #[test]
    fn test_node_count_matches_parse() {
        let (tokens, _) = scan_tokens("(1 + 2) * -3 == !nil");
        let mut reporter = CollectingReporter::new();
        let expr = Parser::new(&tokens, &mut reporter).parse_complete().unwrap();

        // ==, *, group, +, 1, 2, -, 3, !, nil
        assert_eq!(expr.accept(&mut NodeCount), 10);
    }

    #[test]
    fn test_source_printer_round_trip() {
        let sources = [
            "- 123 * ( 45.67 )",
            "1 + 2 + 3",
            "1 + 2 * 3",
            "! ! true",
            "( 1 == 2 ) != ( 3 < 4 )",
            "nil",
            "\"some text\" == \"other\"",
            "--1 - -(2 / 0.25) >= ((3))",
            "1 - (2 - 3)",
            "123456789012345678901234567890 * 0.000001",
        ];

        for source in sources {
            let (tokens, errors) = scan_tokens(source);
            assert!(errors.is_empty());

            let mut reporter = CollectingReporter::new();
            let expr = Parser::new(&tokens, &mut reporter).parse_complete().unwrap();

            let rendered: String = SourcePrinter::print(&expr);

            let (again_tokens, errors) = scan_tokens(&rendered);
            assert!(errors.is_empty(), "{:?} did not rescan", rendered);

            let again = Parser::new(&again_tokens, &mut reporter)
                .parse_complete()
                .unwrap_or_else(|_| panic!("{:?} did not reparse", rendered));

            assert_eq!(AstPrinter::print(&again), AstPrinter::print(&expr), "{}", source);
            assert_eq!(SourcePrinter::print(&again), rendered);
        }

        // A literal beyond f64 range never reaches a tree, so nothing can
        // print as `inf`.
        let huge = format!("1{} + 1", "0".repeat(400));
        let (tokens, errors) = scan_tokens(&huge);

        assert_eq!(errors.len(), 1);
        assert!(tokens
            .iter()
            .filter_map(|t| t.literal.as_ref())
            .all(|l| matches!(l, Literal::Number(n) if n.is_finite())));
    }

    #[test]
    fn test_source_printer_format() {
        let (tokens, _) = scan_tokens("(1+2)*-3 != \"x\"");
        let mut reporter = CollectingReporter::new();
        let expr = Parser::new(&tokens, &mut reporter).parse().unwrap();

        assert_eq!(SourcePrinter::print(&expr), "(1 + 2) * -3 != \"x\"");
    }

    #[test]
    fn test_json_serialization() {
        let expr = Expr::unary(op(TokenType::MINUS, "-"), Expr::literal(2.0));

        let json: serde_json::Value = serde_json::to_value(&expr).unwrap();

        assert_eq!(json["kind"], "Unary");
        assert_eq!(json["operator"]["token_type"], "MINUS");
        assert_eq!(json["operator"]["lexeme"], "-");
        assert_eq!(json["right"]["kind"], "Literal");
        assert_eq!(json["right"]["value"]["Number"], 2.0);
    }
}
