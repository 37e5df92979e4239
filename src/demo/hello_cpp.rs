// hello.cpp: string concatenation, std::sort on a vector, and a Person class

use crate::record::{self, Person};
use crate::runtime::constants::EXIT_SUCCESS;
use crate::runtime::errors::RuntimeError;
use crate::runtime::Machine;

/// Ascending copy of `numbers`
pub fn sorted(mut numbers: Vec<i32>) -> Vec<i32> {
    numbers.sort_unstable();
    numbers
}

pub fn main(m: &mut Machine) -> Result<i32, RuntimeError> {
    m.print(&record::hello("World"));

    let (num1, num2) = (10, 20);
    m.println(&format!("Sum: {}", num1 + num2));

    // std::vector owns its storage; a Vec is the direct equivalent.
    let numbers = sorted(vec![5, 2, 8, 1, 3]);
    m.print("Sorted numbers: ");
    for num in &numbers {
        m.print(&format!("{} ", num));
    }
    m.println("");

    let alice = Person::new("Alice", 30)?;
    let bob = Person::new("Bob", 25)?;
    m.print(&record::info(&alice));
    m.print(&record::info(&bob));

    Ok(EXIT_SUCCESS)
}
