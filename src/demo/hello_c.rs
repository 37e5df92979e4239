// hello.c: running sums, a Person struct, and a guarded malloc

use crate::memory::value::Value;
use crate::record::{self, Person};
use crate::runtime::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::runtime::errors::RuntimeError;
use crate::runtime::Machine;

const NUMBERS: [i32; 5] = [1, 2, 3, 4, 5];
const BUFFER_LEN: usize = 5;

/// Prefix sums of `numbers`
pub fn running_sums(numbers: &[i32]) -> Vec<i32> {
    numbers
        .iter()
        .scan(0, |sum, &n| {
            *sum += n;
            Some(*sum)
        })
        .collect()
}

pub fn main(m: &mut Machine) -> Result<i32, RuntimeError> {
    for (&n, sum) in NUMBERS.iter().zip(running_sums(&NUMBERS)) {
        m.printf(
            "Current number: %d, Running sum: %d\n",
            &[Value::Int(n), Value::Int(sum)],
        )?;
    }

    let person = Person::new("Alice", 30)?;
    m.print(&record::greeting(&person));

    let filled = m.with_int_buffer(BUFFER_LEN, |m, buf| {
        for i in 0..buf.len() {
            m.store(buf, i, i as i32 * 10)?;
            let v = m.load(buf, i)?;
            m.printf("dynamicArray[%d] = %d\n", &[Value::Int(i as i32), Value::Int(v)])?;
        }
        Ok(())
    })?;

    if filled.is_none() {
        m.printf("Memory allocation failed\n", &[])?;
        return Ok(EXIT_FAILURE);
    }

    Ok(EXIT_SUCCESS)
}
