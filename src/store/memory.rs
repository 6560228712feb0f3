//! In-process student store. Sessions work on a private copy and replay their
//! mutations onto the shared map at commit.

use super::{StudentSession, StudentStore};
use crate::error::AppError;
use crate::model::Student;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

type Rows = BTreeMap<i32, Student>;

#[derive(Clone, Debug, Default)]
pub struct MemoryStudentStore {
    rows: Arc<RwLock<Rows>>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with committed rows. Later duplicates overwrite earlier ones.
    pub fn with_students(students: impl IntoIterator<Item = Student>) -> Self {
        let rows = students.into_iter().map(|s| (s.id, s)).collect();
        Self {
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    /// Number of committed rows.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Rows> {
        self.rows.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn begin(&self) -> Result<Box<dyn StudentSession>, AppError> {
        let view = self.read().clone();
        Ok(Box::new(MemoryStudentSession {
            rows: Arc::clone(&self.rows),
            view,
            pending: Vec::new(),
        }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Debug)]
enum Pending {
    Insert(Student),
    Update(Student),
    Delete(i32),
}

pub struct MemoryStudentSession {
    rows: Arc<RwLock<Rows>>,
    view: Rows,
    pending: Vec<Pending>,
}

impl MemoryStudentSession {
    fn committed_contains(&self, id: i32) -> bool {
        self.rows
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(&id)
    }
}

#[async_trait]
impl StudentSession for MemoryStudentSession {
    async fn list(&mut self) -> Result<Vec<Student>, AppError> {
        Ok(self.view.values().cloned().collect())
    }

    async fn get_by_id(&mut self, id: i32) -> Result<Option<Student>, AppError> {
        Ok(self.view.get(&id).cloned())
    }

    async fn insert(&mut self, student: &Student) -> Result<(), AppError> {
        if self.view.contains_key(&student.id) {
            return Err(AppError::Conflict(format!("student {} already exists", student.id)));
        }
        self.view.insert(student.id, student.clone());
        self.pending.push(Pending::Insert(student.clone()));
        Ok(())
    }

    async fn update(&mut self, id: i32, student: &Student) -> Result<bool, AppError> {
        if !self.view.contains_key(&id) {
            return Ok(false);
        }
        // A committed delete from another session wins over this snapshot.
        let inserted_here = self
            .pending
            .iter()
            .any(|op| matches!(op, Pending::Insert(s) if s.id == id));
        if !inserted_here && !self.committed_contains(id) {
            self.view.remove(&id);
            return Ok(false);
        }
        let Some(row) = self.view.get_mut(&id) else {
            return Ok(false);
        };
        let replacement = Student { id, ..student.clone() };
        *row = replacement.clone();
        self.pending.push(Pending::Update(replacement));
        Ok(true)
    }

    async fn delete(&mut self, id: i32) -> Result<bool, AppError> {
        if self.view.remove(&id).is_none() {
            return Ok(false);
        }
        self.pending.push(Pending::Delete(id));
        Ok(true)
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let MemoryStudentSession { rows, pending, .. } = *self;
        let mut shared = rows.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut next = shared.clone();
        for op in pending {
            match op {
                Pending::Insert(s) => {
                    if next.contains_key(&s.id) {
                        return Err(AppError::Conflict(format!("student {} already exists", s.id)));
                    }
                    next.insert(s.id, s);
                }
                Pending::Update(s) => {
                    let Some(row) = next.get_mut(&s.id) else {
                        return Err(AppError::NotFound(format!("student {}", s.id)));
                    };
                    *row = s;
                }
                Pending::Delete(id) => {
                    next.remove(&id);
                }
            }
        }
        *shared = next;
        Ok(())
    }
}
