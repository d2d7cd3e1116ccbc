use serde::{Deserialize, Serialize};

/// Store and query operations a handler can be charged for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceOpcode {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Limit,
    OpenTable,
    CreateTable,
    Select,
    Insert,
    Update,
    Remove,
}

/// Gas pricing table for precompiled handlers.
///
/// Table creation and row writes dominate; opening and reading are cheap but
/// not free, and every comparison a query evaluates carries a small charge.
/// Memory is charged on the larger of the input and output payloads, per
/// 32-byte word with a quadratic term so that huge payloads get expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasSchedule {
    pub compare: u64,
    pub limit: u64,
    pub open_table: u64,
    pub create_table: u64,
    pub select: u64,
    pub insert: u64,
    pub update: u64,
    pub remove: u64,
    pub memory_word: u64,
    pub memory_quad_divisor: u64,
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            compare: 3,
            limit: 3,
            open_table: 200,
            create_table: 16_000,
            select: 200,
            insert: 10_000,
            update: 10_000,
            remove: 2_500,
            memory_word: 3,
            memory_quad_divisor: 512,
        }
    }
}

impl GasSchedule {
    /// Loads a schedule from JSON; fields left out keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn operation_cost(&self, op: InterfaceOpcode) -> u64 {
        match op {
            InterfaceOpcode::Eq
            | InterfaceOpcode::Ne
            | InterfaceOpcode::Gt
            | InterfaceOpcode::Ge
            | InterfaceOpcode::Lt
            | InterfaceOpcode::Le => self.compare,
            InterfaceOpcode::Limit => self.limit,
            InterfaceOpcode::OpenTable => self.open_table,
            InterfaceOpcode::CreateTable => self.create_table,
            InterfaceOpcode::Select => self.select,
            InterfaceOpcode::Insert => self.insert,
            InterfaceOpcode::Update => self.update,
            InterfaceOpcode::Remove => self.remove,
        }
    }

    pub fn memory_cost(&self, bytes: usize) -> u64 {
        if bytes == 0 {
            return 0;
        }
        let words = (bytes as u64).saturating_add(31) / 32;
        let linear = self.memory_word.saturating_mul(words);
        let quadratic = match self.memory_quad_divisor {
            0 => 0,
            divisor => words.saturating_mul(words) / divisor,
        };
        linear.saturating_add(quadratic)
    }
}

/// Per-call gas accumulator.
///
/// Created fresh for each call: handlers record the input size on entry,
/// one operation per store access, and the output size before returning.
#[derive(Debug, Clone)]
pub struct PrecompiledGas {
    schedule: GasSchedule,
    mem_used: usize,
    operations: Vec<InterfaceOpcode>,
}

impl PrecompiledGas {
    pub fn new(schedule: GasSchedule) -> Self {
        Self {
            schedule,
            mem_used: 0,
            operations: Vec::new(),
        }
    }

    pub fn set_mem_used(&mut self, bytes: usize) {
        self.mem_used = bytes;
    }

    /// Memory is charged at its high-water mark.
    pub fn update_mem_used(&mut self, bytes: usize) {
        if bytes > self.mem_used {
            self.mem_used = bytes;
        }
    }

    pub fn append_operation(&mut self, op: InterfaceOpcode) {
        self.operations.push(op);
    }

    pub fn mem_used(&self) -> usize {
        self.mem_used
    }

    pub fn operations(&self) -> &[InterfaceOpcode] {
        &self.operations
    }

    pub fn count(&self, op: InterfaceOpcode) -> usize {
        self.operations.iter().filter(|o| **o == op).count()
    }

    pub fn total_gas(&self) -> u64 {
        self.operations
            .iter()
            .fold(self.schedule.memory_cost(self.mem_used), |acc, op| {
                acc.saturating_add(self.schedule.operation_cost(*op))
            })
    }
}
