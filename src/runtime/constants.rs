// Constants for the demonstration runtime

/// Starting address for heap allocations
/// Heap addresses start at 0x10000000 so they never look like small integers
pub const HEAP_ADDRESS_START: u64 = 0x1000_0000;

/// Default heap limit for a single demo run (10 MB)
pub const DEFAULT_HEAP_LIMIT: usize = 10 * 1024 * 1024;

/// Exit status of a snippet that ran to completion
pub const EXIT_SUCCESS: i32 = 0;

/// Exit status a C snippet returns from its allocation guard
pub const EXIT_FAILURE: i32 = 1;
