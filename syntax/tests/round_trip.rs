use std::io::Cursor;
use syntax::statement::Kind;
use syntax::{Block, Condition, Program, Scanner, Statement, Tokens};

fn scan(source: &str) -> Tokens {
    Scanner::new(Cursor::new(source)).scan_tokens().unwrap()
}

fn parse(source: &str) -> Program {
    syntax::parse_program(&mut scan(source)).unwrap()
}

const LEARNING: &str = r#"
# A creature that keeps spreading while it can.
PROGRAM Learning IS

  INSTRUCTION find-obstacle IS
    WHILE next-is-empty DO
      move
    END WHILE
  END find-obstacle

  INSTRUCTION turn-around IS
    turnleft
    turnleft
  END turn-around

  INSTRUCTION react IS
    IF next-is-enemy THEN
      infect
    ELSE
      IF next-is-wall THEN
        turn-around
      ELSE
        IF random THEN
          turnright
        END IF
      END IF
    END IF
  END react

BEGIN
  WHILE true DO
    find-obstacle
    react
    IF next-is-not-friend THEN
    END IF
  END WHILE
END Learning
"#;

#[test]
fn printed_program_parses_back() {
    let program = parse(LEARNING);
    let printed = program.to_string();
    let reparsed = parse(&printed);

    assert_eq!(program, reparsed);
    assert_eq!(printed, reparsed.to_string());
}

#[test]
fn context_holds_every_instruction() {
    let program = parse(LEARNING);

    assert_eq!(program.name(), "Learning");
    assert_eq!(
        program.context().names().collect::<Vec<_>>(),
        ["find-obstacle", "turn-around", "react"]
    );

    let react = program.context().get("react").unwrap();
    assert_eq!(react.len(), 1);
    assert!(matches!(
        react.iter().next(),
        Some(Statement::IfElse {
            condition: Condition::NextIsEnemy,
            ..
        })
    ));
}

#[test]
fn body_shape() {
    let program = parse(LEARNING);
    let kinds: Vec<Kind> = program.body().iter().map(Statement::kind).collect();
    assert_eq!(kinds, [Kind::While]);

    let Some(Statement::While { condition, body }) = program.body().iter().next() else {
        panic!("expected a while loop");
    };
    assert_eq!(*condition, Condition::True);
    assert_eq!(
        body.iter().map(Statement::kind).collect::<Vec<_>>(),
        [Kind::Call, Kind::Call, Kind::If]
    );
}

#[test]
fn printed_statement_parses_back() {
    let source = "IF next-is-wall THEN turnleft ELSE WHILE random DO skip END WHILE END IF";
    let statement = syntax::parse_statement(&mut scan(source)).unwrap();
    let reparsed = syntax::parse_statement(&mut scan(&statement.to_string())).unwrap();

    assert_eq!(statement, reparsed);
}

#[test]
fn failed_parse_yields_no_program() {
    let error = syntax::parse_program(&mut scan("PROGRAM P IS BEGIN move END Q")).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Names do not match: \"P\" is closed by \"Q\""
    );
    assert!(!error.is_contract_violation());
}

#[test]
fn nested_block_statement_reads_back_flattened() {
    let call = |name: &str| Statement::Call(String::from(name));
    let nested = Block::from(vec![Statement::Block(Block::from(vec![call("move")])), call("skip")]);

    let reparsed = syntax::parse_block(&mut scan(&nested.to_string())).unwrap();
    assert_eq!(reparsed, Block::from(vec![call("move"), call("skip")]));
    assert_ne!(reparsed, nested);
}
