// simple.c: arithmetic, an array, struct pointers and an `if (ptr != NULL)` malloc

use crate::memory::value::Value;
use crate::record::{self, Person};
use crate::runtime::constants::EXIT_SUCCESS;
use crate::runtime::errors::RuntimeError;
use crate::runtime::Machine;

const NUMBERS: [i32; 5] = [5, 2, 8, 1, 3];

pub fn main(m: &mut Machine) -> Result<i32, RuntimeError> {
    m.printf("C Programming Example\n", &[])?;
    m.print(&record::hello("World"));

    let (a, b) = (10, 20);
    m.printf("Sum: %d\n", &[Value::Int(a + b)])?;

    m.printf("Numbers: ", &[])?;
    for n in NUMBERS {
        m.printf("%d ", &[Value::Int(n)])?;
    }
    m.printf("\n", &[])?;

    let person1 = Person::new("Alice", 30)?;
    let person2 = Person::new("Bob", 25)?;
    m.print(&record::info(&person1));
    m.print(&record::info(&person2));

    // A NULL result just skips the block; the exit status is unaffected.
    m.with_int_buffer(3, |m, buf| {
        m.store(buf, 0, 100)?;
        m.store(buf, 1, 200)?;
        m.store(buf, 2, 300)?;
        let args = [
            Value::Int(m.load(buf, 0)?),
            Value::Int(m.load(buf, 1)?),
            Value::Int(m.load(buf, 2)?),
        ];
        m.printf("Dynamic array: %d %d %d\n", &args)?;
        Ok(())
    })?;

    Ok(EXIT_SUCCESS)
}
