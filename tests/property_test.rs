use axe::dev::Headless;
use axe::lang::token::Token;
use axe::lang::{lex, ErrorCode, Span};
use axe::mach::{Event, Opcode, Runtime, MEMORY_SIZE};
use quickcheck::{QuickCheck, TestResult};
use quickcheck_macros::quickcheck;

const FRAGMENTS: &[&str] = &[
    "A", "B", "->", "Disp ", "1", "007", "+", "-", "*", "^", "=", "!=", "<=", ":", "\n", " ",
    "\t", ".note", "...", "{", "}", "^^r", "^^2", "o^^", "L1", "getKey", "GetKey", "(", ")",
    ",", "Pxl-On", "pxl-Test", "For", "If ", "End", "@DEBUG", "rand", "LOOP", "++", "--",
];

const STATEMENTS: &[&str] = &[
    "A++",
    "B+A->B",
    "Disp A",
    "If getKey(0):C++:End",
    "rand^10->D",
    "Pxl-On(A,B)",
    "{L1+A}->E",
    "A*3->{L1+B}^^r",
    "While A<5:A++:End",
    "Disp B/A",
    "For(2):E+1->E:End",
    "Disp Pxl-Test(A,B)",
];

fn pick(parts: &[&str], choices: &[u8], sep: &str) -> String {
    choices
        .iter()
        .map(|c| parts[*c as usize % parts.len()])
        .collect::<Vec<_>>()
        .join(sep)
}

#[quickcheck]
fn relexing_token_text_is_stable(choices: Vec<u8>) -> TestResult {
    let source = pick(FRAGMENTS, &choices, "");
    let tokens = match lex(&source) {
        Ok(tokens) => tokens,
        Err(_) => return TestResult::discard(),
    };
    let text: String = tokens.iter().map(|(_, t)| t.to_string()).collect();
    let again = match lex(&text) {
        Ok(again) => again,
        Err(_) => return TestResult::failed(),
    };
    let kinds = |v: &[(Span, Token)]| {
        v.iter().map(|(_, t)| t.clone()).collect::<Vec<_>>()
    };
    TestResult::from_bool(kinds(&tokens) == kinds(&again))
}

#[test]
fn labels_resolve_to_following_instruction() {
    fn property(ids: Vec<u8>) -> TestResult {
        let mut names: Vec<u8> = ids;
        names.sort_unstable();
        names.dedup();
        if names.is_empty() {
            return TestResult::discard();
        }
        let mut source = String::new();
        for id in names.iter().rev() {
            source.push_str(&format!("Goto N{}\n", id));
        }
        for id in &names {
            source.push_str(&format!("Disp {}\nLbl N{}\n", id, id));
        }
        let program = match axe::compile(&source) {
            Ok(program) => program,
            Err(_) => return TestResult::failed(),
        };
        let jumps = names.len();
        for (index, id) in names.iter().enumerate() {
            let addr = jumps + 2 * (index + 1);
            if program.label(&format!("N{}", id)) != Some(addr) {
                return TestResult::failed();
            }
        }
        for op in program.ops() {
            if let Opcode::Jump(addr) = op {
                if !names
                    .iter()
                    .any(|id| program.label(&format!("N{}", id)) == Some(*addr))
                {
                    return TestResult::failed();
                }
            }
        }
        source.push_str("Goto MISSING\n");
        match axe::compile(&source) {
            Err(error) => TestResult::from_bool(error.is(ErrorCode::UndefinedLabel)),
            Ok(_) => TestResult::failed(),
        }
    }
    QuickCheck::new()
        .tests(50)
        .quickcheck(property as fn(Vec<u8>) -> TestResult);
}

#[test]
fn execution_is_deterministic() {
    fn trial(source: &str, keys: &[bool]) -> (Event, Vec<String>, Vec<String>, Runtime) {
        let mut runtime = Runtime::new();
        let mut device = Headless::with_seed(7).with_keys(keys.to_vec());
        let event = match axe::compile(source) {
            Ok(program) => {
                runtime.load(program);
                runtime.execute(&mut device, 20_000)
            }
            Err(error) => Event::Fault(error),
        };
        let output = device.take_output();
        let records = device.take_records();
        (event, output, records, runtime)
    }
    fn property(choices: Vec<u8>, keys: Vec<bool>) -> bool {
        let source = format!("@DEBUG 1\n{}", pick(STATEMENTS, &choices, "\n"));
        let (event1, out1, rec1, rt1) = trial(&source, &keys);
        let (event2, out2, rec2, rt2) = trial(&source, &keys);
        event1 == event2
            && out1 == out2
            && rec1 == rec2
            && rt1.memory() == rt2.memory()
            && rt1.pc() == rt2.pc()
            && rt1.status() == rt2.status()
    }
    QuickCheck::new()
        .tests(50)
        .quickcheck(property as fn(Vec<u8>, Vec<bool>) -> bool);
}

#[quickcheck]
fn dereference_is_in_range_or_faults(a: u16, b: u16, negative: bool, word: bool) -> bool {
    let width = if word { 2 } else { 1 };
    let sign = if negative { "-" } else { "" };
    let modifier = if word { "^^r" } else { "" };
    let source = format!("Disp {{{}{}*2-{}}}{}", sign, a, b, modifier);
    let magnitude = i64::from(a) * 2;
    let addr = if negative { -magnitude } else { magnitude } - i64::from(b);
    let in_range = addr >= 0 && addr + width <= MEMORY_SIZE as i64;
    let mut runtime = Runtime::new();
    let mut device = Headless::new();
    let program = match axe::compile(&source) {
        Ok(program) => program,
        Err(_) => return false,
    };
    runtime.load(program);
    match runtime.execute(&mut device, 100) {
        Event::Stopped => in_range && device.output().len() == 1,
        Event::Fault(error) => !in_range && error.is(ErrorCode::MemoryFault),
        _ => false,
    }
}
