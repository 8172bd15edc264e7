//! Queue of operations waiting for the next batch commit

use super::operation::Operation;

/// Operations added since the last commit
#[derive(Debug, Clone, Default)]
pub struct Operations {
    operations: Vec<Operation>,
}

impl Operations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an operation after validating its payload
    pub fn push(&mut self, operation: Operation) -> anyhow::Result<()> {
        operation.validate()?;
        self.operations.push(operation);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Take every queued operation, split into batches of at most `chunk_size`
    pub fn drain_chunks(&mut self, chunk_size: usize) -> Vec<Vec<Operation>> {
        let chunk_size = chunk_size.max(1);
        let drained = std::mem::take(&mut self.operations);

        let mut chunks = Vec::with_capacity(drained.len().div_ceil(chunk_size));
        let mut current = Vec::with_capacity(chunk_size);
        for operation in drained {
            current.push(operation);
            if current.len() == chunk_size {
                chunks.push(std::mem::replace(&mut current, Vec::with_capacity(chunk_size)));
            }
        }
        if !current.is_empty() {
            chunks.push(current);
        }
        chunks
    }
}

impl<'a> IntoIterator for &'a Operations {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}
