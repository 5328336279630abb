#![allow(dead_code)]

use axe::dev::Headless;
use axe::mach::{Event, Runtime};

/// Compiles and runs `source` on `runtime`, collecting displayed lines and
/// errors the way a terminal would show them.
pub fn exec_on(runtime: &mut Runtime, device: &mut Headless, source: &str) -> String {
    exec_n(runtime, device, source, 5000)
}

pub fn exec(source: &str) -> String {
    let mut runtime = Runtime::default();
    let mut device = Headless::new();
    exec_on(&mut runtime, &mut device, source)
}

pub fn exec_n(runtime: &mut Runtime, device: &mut Headless, source: &str, cycles: usize) -> String {
    let mut s = String::new();
    let program = match axe::compile(source) {
        Ok(program) => program,
        Err(error) => return format!("{}\n", error),
    };
    runtime.load(program);
    let mut prev_running = false;
    loop {
        let event = runtime.execute(device, cycles);
        for line in device.take_output() {
            s.push_str(&line);
            s.push('\n');
        }
        match &event {
            Event::Stopped | Event::Exit | Event::Interrupted => break,
            Event::Fault(error) => {
                s.push_str(&format!("{}\n", error));
                break;
            }
            Event::Running => {
                if prev_running {
                    s.push_str(&format!("\n{} Execution cycles exceeded.\n", cycles));
                    break;
                }
            }
            Event::Help | Event::About => {}
        }
        prev_running = event == Event::Running;
    }
    s
}
