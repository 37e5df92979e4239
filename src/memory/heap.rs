//! Heap implementation for the demonstration runtime
//!
//! This module provides heap memory management with:
//! - Explicit allocation/deallocation (malloc/free)
//! - Tombstone tracking for freed blocks
//! - Per-byte initialization tracking
//! - Use-after-free and double-free detection
//! - A size limit and an allocation-failure injection point
//!
//! Freed blocks are never removed from the allocation map. Keeping them as
//! tombstones is what lets a stale address be reported as a use-after-free
//! instead of an invalid pointer.

use super::value::Address;
use crate::runtime::constants::{DEFAULT_HEAP_LIMIT, HEAP_ADDRESS_START};
use log::{debug, warn};
use std::collections::BTreeMap;
use thiserror::Error;

/// Heap-level failures; mapped to `RuntimeError` by the machine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    #[error("zero-size allocation requested")]
    ZeroSize,

    #[error("out of memory: requested {requested} bytes, {allocated} in use, limit is {limit}")]
    Exhausted {
        requested: usize,
        allocated: usize,
        limit: usize,
    },

    #[error("allocation #{ordinal} failed by request")]
    InjectedFailure { ordinal: usize },

    #[error("double free detected at address 0x{0:x}")]
    DoubleFree(Address),

    #[error("invalid free: address 0x{0:x} was never allocated")]
    InvalidFree(Address),

    #[error("use-after-free: address 0x{0:x} has been freed")]
    UseAfterFree(Address),

    #[error("invalid access: address 0x{0:x} not in any allocated block")]
    Unmapped(Address),

    #[error("uninitialized read at address 0x{0:x}")]
    Uninitialized(Address),
}

/// State of a heap block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    Allocated,
    Tombstone, // Freed, kept for stale-access detection
}

/// A block of heap memory
#[derive(Debug, Clone)]
pub struct HeapBlock {
    data: Vec<u8>,
    state: BlockState,
    init_map: Vec<bool>, // Per-byte initialization tracking
}

impl HeapBlock {
    fn new(size: usize) -> Self {
        HeapBlock {
            data: vec![0; size],
            state: BlockState::Allocated,
            init_map: vec![false; size],
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// The heap
#[derive(Debug, Clone)]
pub struct Heap {
    allocations: BTreeMap<Address, HeapBlock>,
    next_address: Address,
    total_allocated_bytes: usize,
    max_heap_size: usize,
    allocation_count: usize,
    fail_on: Option<usize>,
}

impl Heap {
    /// Create a new heap with a maximum size limit
    pub fn new(max_heap_size: usize) -> Self {
        Heap {
            allocations: BTreeMap::new(),
            next_address: HEAP_ADDRESS_START,
            total_allocated_bytes: 0,
            max_heap_size,
            allocation_count: 0,
            fail_on: None,
        }
    }

    /// Make the `ordinal`-th allocation request (1-based) fail
    pub fn fail_allocation(&mut self, ordinal: usize) {
        self.fail_on = Some(ordinal);
    }

    /// Allocate a block of memory
    pub fn allocate(&mut self, size: usize) -> Result<Address, HeapError> {
        // A zero-size block would share its address with the next one
        if size == 0 {
            return Err(HeapError::ZeroSize);
        }

        self.allocation_count += 1;

        if self.fail_on == Some(self.allocation_count) {
            warn!(
                "failing allocation #{} of {} bytes by request",
                self.allocation_count, size
            );
            return Err(HeapError::InjectedFailure {
                ordinal: self.allocation_count,
            });
        }

        if self.total_allocated_bytes + size > self.max_heap_size {
            return Err(HeapError::Exhausted {
                requested: size,
                allocated: self.total_allocated_bytes,
                limit: self.max_heap_size,
            });
        }

        let addr = self.next_address;
        self.next_address += size as u64;
        self.allocations.insert(addr, HeapBlock::new(size));
        self.total_allocated_bytes += size;

        debug!("allocated {} bytes at 0x{:x}", size, addr);
        Ok(addr)
    }

    /// Free a block of memory (mark as tombstone)
    pub fn free(&mut self, addr: Address) -> Result<(), HeapError> {
        match self.allocations.get_mut(&addr) {
            Some(block) if block.state == BlockState::Allocated => {
                block.state = BlockState::Tombstone;
                self.total_allocated_bytes -= block.size();
                debug!("freed {} bytes at 0x{:x}", block.size(), addr);
                Ok(())
            }
            Some(_) => Err(HeapError::DoubleFree(addr)),
            None => Err(HeapError::InvalidFree(addr)),
        }
    }

    /// Find the block containing `addr`, returning its base address
    fn locate(&self, addr: Address) -> Result<(Address, &HeapBlock), HeapError> {
        self.allocations
            .range(..=addr)
            .next_back()
            .filter(|(base, block)| addr < **base + block.size() as u64)
            .map(|(&base, block)| (base, block))
            .ok_or(HeapError::Unmapped(addr))
    }

    /// Get the live block containing `addr` and the offset into it
    pub fn get_block(&self, addr: Address) -> Result<(&HeapBlock, usize), HeapError> {
        let (base, block) = self.locate(addr)?;
        if block.state == BlockState::Tombstone {
            return Err(HeapError::UseAfterFree(addr));
        }
        Ok((block, (addr - base) as usize))
    }

    /// Size of the live block starting exactly at `addr`
    pub fn block_size(&self, addr: Address) -> Result<usize, HeapError> {
        match self.allocations.get(&addr) {
            Some(block) if block.state == BlockState::Allocated => Ok(block.size()),
            Some(_) => Err(HeapError::UseAfterFree(addr)),
            None => Err(HeapError::Unmapped(addr)),
        }
    }

    /// Write a single byte to an address
    pub fn write_byte(&mut self, addr: Address, byte: u8) -> Result<(), HeapError> {
        let base = {
            let (base, block) = self.locate(addr)?;
            if block.state == BlockState::Tombstone {
                return Err(HeapError::UseAfterFree(addr));
            }
            base
        };
        let offset = (addr - base) as usize;
        let block = self
            .allocations
            .get_mut(&base)
            .ok_or(HeapError::Unmapped(addr))?;
        block.data[offset] = byte;
        block.init_map[offset] = true;
        Ok(())
    }

    /// Read a single byte from an address
    pub fn read_byte(&self, addr: Address) -> Result<u8, HeapError> {
        let (block, offset) = self.get_block(addr)?;

        if !block.init_map[offset] {
            return Err(HeapError::Uninitialized(addr));
        }

        Ok(block.data[offset])
    }

    /// Write multiple bytes starting at an address
    pub fn write_bytes_at(&mut self, addr: Address, bytes: &[u8]) -> Result<(), HeapError> {
        for (i, &byte) in bytes.iter().enumerate() {
            self.write_byte(addr + i as u64, byte)?;
        }
        Ok(())
    }

    /// Read multiple bytes starting at an address
    pub fn read_bytes_at(&self, addr: Address, size: usize) -> Result<Vec<u8>, HeapError> {
        (0..size)
            .map(|i| self.read_byte(addr + i as u64))
            .collect()
    }

    /// Get all blocks, including tombstones
    pub fn allocations(&self) -> &BTreeMap<Address, HeapBlock> {
        &self.allocations
    }

    /// Number of blocks that have not been freed
    pub fn live_blocks(&self) -> usize {
        self.allocations
            .values()
            .filter(|b| b.state == BlockState::Allocated)
            .count()
    }

    /// Number of allocation requests seen, including failed ones
    pub fn allocation_count(&self) -> usize {
        self.allocation_count
    }

    /// Bytes currently held by live blocks
    pub fn total_allocated(&self) -> usize {
        self.total_allocated_bytes
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new(DEFAULT_HEAP_LIMIT)
    }
}
