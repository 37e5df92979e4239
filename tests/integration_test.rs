// Integration tests for the demonstration harness

use snipgallery::catalog::Catalog;
use snipgallery::config::GalleryConfig;
use snipgallery::demo::{self, DemoProgram, RunError};
use snipgallery::runtime::errors::RuntimeError;
use snipgallery::runtime::Machine;

fn default_config() -> GalleryConfig {
    GalleryConfig::default()
}

fn failing_first_alloc() -> GalleryConfig {
    GalleryConfig::builder().fail_allocation(1).build()
}

#[test]
fn test_hello_c_output() {
    let outcome = demo::run(DemoProgram::HelloC, &default_config()).expect("Execution failed");

    let expected = "\
Current number: 1, Running sum: 1
Current number: 2, Running sum: 3
Current number: 3, Running sum: 6
Current number: 4, Running sum: 10
Current number: 5, Running sum: 15
Hello, Alice! You are 30 years old.
dynamicArray[0] = 0
dynamicArray[1] = 10
dynamicArray[2] = 20
dynamicArray[3] = 30
dynamicArray[4] = 40
";
    assert_eq!(outcome.stdout, expected);
    assert_eq!(outcome.exit_code, 0);
    assert_eq!(outcome.allocations, 1);
    assert_eq!(outcome.live_blocks, 0);
}

#[test]
fn test_hello_c_running_sums_and_final_sum() {
    let outcome = demo::run(DemoProgram::HelloC, &default_config()).expect("Execution failed");

    let sums: Vec<i32> = outcome
        .lines()
        .iter()
        .filter_map(|l| l.split("Running sum: ").nth(1))
        .map(|s| s.parse().unwrap())
        .collect();
    assert_eq!(sums, vec![1, 3, 6, 10, 15]);
    assert_eq!(sums.last(), Some(&15));
}

#[test]
fn test_hello_c_allocation_failure() {
    let outcome = demo::run(DemoProgram::HelloC, &failing_first_alloc()).expect("Execution failed");

    assert_eq!(outcome.exit_code, 1);
    assert!(!outcome.success());

    let lines = outcome.lines();
    assert_eq!(lines.last(), Some(&"Memory allocation failed"));
    assert!(lines.contains(&"Hello, Alice! You are 30 years old."));
    // The guard must stop before the buffer loop
    assert!(!outcome.stdout.contains("dynamicArray"));
    assert_eq!(outcome.live_blocks, 0);
}

#[test]
fn test_hello_c_heap_limit_too_small() {
    // 5 ints need 20 bytes
    let config = GalleryConfig::builder().heap_limit(16).build();
    let outcome = demo::run(DemoProgram::HelloC, &config).expect("Execution failed");
    assert_eq!(outcome.exit_code, 1);
    assert!(outcome.stdout.ends_with("Memory allocation failed\n"));
}

#[test]
fn test_simple_c_output() {
    let outcome = demo::run(DemoProgram::SimpleC, &default_config()).expect("Execution failed");

    // printf("%d ") leaves a trailing space before the newline
    let expected = concat!(
        "C Programming Example\n",
        "Hello, World!\n",
        "Sum: 30\n",
        "Numbers: 5 2 8 1 3 \n",
        "Name: Alice, Age: 30\n",
        "Name: Bob, Age: 25\n",
        "Dynamic array: 100 200 300\n",
    );
    assert_eq!(outcome.stdout, expected);
    assert_eq!(outcome.exit_code, 0);
    assert_eq!(outcome.live_blocks, 0);
}

#[test]
fn test_simple_c_allocation_failure_skips_block() {
    let outcome =
        demo::run(DemoProgram::SimpleC, &failing_first_alloc()).expect("Execution failed");

    assert_eq!(outcome.exit_code, 0);
    assert!(!outcome.stdout.contains("Dynamic array"));
    assert!(outcome.stdout.ends_with("Name: Bob, Age: 25\n"));
}

#[test]
fn test_hello_cpp_output() {
    let outcome = demo::run(DemoProgram::HelloCpp, &default_config()).expect("Execution failed");

    let expected = concat!(
        "Hello, World!\n",
        "Sum: 30\n",
        "Sorted numbers: 1 2 3 5 8 \n",
        "Name: Alice, Age: 30\n",
        "Name: Bob, Age: 25\n",
    );
    assert_eq!(outcome.stdout, expected);
    assert_eq!(outcome.exit_code, 0);
    assert_eq!(outcome.allocations, 0);
}

#[test]
fn test_hello_cpp_sorted_sequence() {
    let outcome = demo::run(DemoProgram::HelloCpp, &default_config()).expect("Execution failed");

    let line = outcome
        .lines()
        .into_iter()
        .find(|l| l.starts_with("Sorted numbers:"))
        .expect("missing sorted line");
    let sorted: Vec<i32> = line["Sorted numbers:".len()..]
        .split_whitespace()
        .map(|n| n.parse().unwrap())
        .collect();
    assert_eq!(sorted, vec![1, 2, 3, 5, 8]);
}

#[test]
fn test_hello_ts_output() {
    let outcome = demo::run(DemoProgram::HelloTs, &default_config()).expect("Execution failed");

    assert_eq!(
        outcome.lines(),
        vec![
            "Language: TypeScript, Version: 4.9",
            "Hello, Alice! You are 30 years old.",
            "Hello, Bob! You are 35 years old.",
            "Bob works in Engineering",
            "Doubled numbers: 2, 4, 6, 8, 10",
        ]
    );
}

#[test]
fn test_every_demo_is_deterministic() {
    for program in DemoProgram::ALL {
        let stable = demo::check_determinism(program, &default_config(), 3)
            .expect("Execution failed");
        assert!(stable, "{} produced differing output", program.snippet_id());

        let stable = demo::check_determinism(program, &failing_first_alloc(), 3)
            .expect("Execution failed");
        assert!(stable, "{} differs under failed allocation", program.snippet_id());
    }
}

#[test]
fn test_every_demo_releases_its_heap() {
    for program in DemoProgram::ALL {
        let outcome = demo::run(program, &default_config()).expect("Execution failed");
        assert_eq!(outcome.live_blocks, 0, "{} leaked", program.snippet_id());
    }
}

#[test]
fn test_demo_ids_resolve_in_catalog() {
    let catalog = Catalog::builtin();
    for program in DemoProgram::ALL {
        let snippet = catalog
            .get(program.snippet_id())
            .expect("demo without snippet");
        assert_eq!(snippet.demo(), Some(program));
    }
}

#[test]
fn test_run_snippet_display_only() {
    let catalog = Catalog::builtin();
    let java = catalog.get("hello.java").unwrap();
    let err = demo::run_snippet(java, &default_config()).unwrap_err();
    assert!(matches!(err, RunError::NotRunnable("hello.java")));
}

#[test]
fn test_run_snippet_runs_attached_demo() {
    let catalog = Catalog::builtin();
    let snippet = catalog.get("simple.c").unwrap();
    let outcome = demo::run_snippet(snippet, &default_config()).expect("Execution failed");
    assert_eq!(outcome.snippet, "simple.c");
    assert!(outcome.success());
}

// === SCOPED BUFFER TESTS ===

#[test]
fn test_stale_buffer_access_is_use_after_free() {
    let mut machine = Machine::new(&default_config());

    let mut stale = None;
    let result = machine
        .with_int_buffer(3, |m, buf| {
            m.store(buf, 0, 7)?;
            stale = Some(buf);
            m.load(buf, 0)
        })
        .expect("Execution failed");
    assert_eq!(result, Some(7));

    let buf = stale.unwrap();
    assert_eq!(
        machine.load(buf, 0),
        Err(RuntimeError::UseAfterFree { address: buf.addr() })
    );
    assert_eq!(
        machine.store(buf, 1, 1),
        Err(RuntimeError::UseAfterFree { address: buf.addr() })
    );
    assert_eq!(machine.heap().live_blocks(), 0);
}

#[test]
fn test_buffer_released_when_body_fails() {
    let mut machine = Machine::new(&default_config());

    let err = machine
        .with_int_buffer(2, |m, buf| {
            m.store(buf, 0, 1)?;
            m.store(buf, 2, 3)?; // out of bounds
            Ok(())
        })
        .unwrap_err();

    assert_eq!(err, RuntimeError::BufferOverrun { index: 2, size: 2 });
    assert_eq!(machine.heap().live_blocks(), 0);
}

#[test]
fn test_body_not_run_when_allocation_fails() {
    let mut machine = Machine::new(&failing_first_alloc());

    let mut ran = false;
    let result = machine
        .with_int_buffer(4, |_, _| {
            ran = true;
            Ok(())
        })
        .expect("Execution failed");

    assert_eq!(result, None);
    assert!(!ran);
    assert_eq!(machine.heap().allocation_count(), 1);
}

#[test]
fn test_double_release_is_reported() {
    let mut machine = Machine::new(&default_config());
    let buf = machine.alloc_ints(1).unwrap().unwrap();
    machine.release(buf).unwrap();
    assert_eq!(
        machine.release(buf),
        Err(RuntimeError::DoubleFree { address: buf.addr() })
    );
}
