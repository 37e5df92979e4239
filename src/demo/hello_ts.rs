// hello.ts: a generic pair, an interface, a class, and Array.map

use crate::record::{self, Person};
use crate::runtime::constants::EXIT_SUCCESS;
use crate::runtime::errors::RuntimeError;
use crate::runtime::Machine;

struct Employee {
    person: Person,
    department: &'static str,
}

impl Employee {
    fn details(&self) -> String {
        format!("{} works in {}", self.person.name(), self.department)
    }
}

fn doubled(numbers: &[i32]) -> Vec<i32> {
    numbers.iter().map(|n| n * 2).collect()
}

pub fn main(m: &mut Machine) -> Result<i32, RuntimeError> {
    let pair = ("TypeScript", 4.9);
    m.println(&format!("Language: {}, Version: {}", pair.0, pair.1));

    let alice = Person::new("Alice", 30)?;
    m.print(&record::greeting(&alice));

    let bob = Employee {
        person: Person::new("Bob", 35)?,
        department: "Engineering",
    };
    m.print(&record::greeting(&bob.person));
    m.println(&bob.details());

    let numbers = doubled(&[1, 2, 3, 4, 5]);
    let joined = numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    m.println(&format!("Doubled numbers: {}", joined));

    Ok(EXIT_SUCCESS)
}
