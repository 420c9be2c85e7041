use crashid::{parse_stack_trace, CrashId};

fn main() {
    let crash_id = CrashId::jvm().expect("digest self-test");
    let trace = "\
java.lang.IllegalStateException: boom
\tat java.lang.Thread.run(Thread.java:748)
\tat com.example.App.run(App.java:7)
Caused by: java.io.IOException: disk
\tat com.example.Store.save(Native Method)
\t... 2 more
";

    let crash = match parse_stack_trace(trace) {
        Ok(crash) => crash,
        Err(err) => {
            eprintln!("parsing failed: {}", err);
            std::process::exit(1);
        }
    };

    match crash_id.inspect(&crash) {
        Ok(inspection) => {
            println!("{}", inspection.raw);
            println!("{}", inspection.fingerprint);
        }
        Err(err) => {
            eprintln!("fingerprinting failed: {}", err);
            std::process::exit(1);
        }
    }
}
