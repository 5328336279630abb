use crate::dev::Headless;
use crate::mach::{Event, Program, Runtime};

mod codegen_test;

fn compile(s: &str) -> Program {
    match crate::compile(s) {
        Ok(program) => program,
        Err(error) => panic!("{}\n{}", s, error),
    }
}

/// Runs `s` on a fresh runtime until it stops, passing over Help and
/// About. Returns the final event.
fn run_on(runtime: &mut Runtime, device: &mut Headless, s: &str) -> Event {
    runtime.load(compile(s));
    for _ in 0..100 {
        match runtime.execute(device, 10_000) {
            Event::Running | Event::Help | Event::About => {}
            event => return event,
        }
    }
    Event::Running
}

fn run(s: &str) -> (Runtime, Headless, Event) {
    let mut runtime = Runtime::new();
    let mut device = Headless::new();
    let event = run_on(&mut runtime, &mut device, s);
    (runtime, device, event)
}

fn output(s: &str) -> Vec<String> {
    let (_, device, event) = run(s);
    assert_eq!(event, Event::Stopped, "{}", s);
    device.output().to_vec()
}
