//! The record store
//!
//! Two fixed slot arrays plus active counters:
//! - Creation fills the lowest-indexed inactive slot (first-fit)
//! - Deletion only clears the `active` flag
//! - Class ids are `slot index + 1`, so a freed id comes back with its slot
//!
//! Every mutating method updates the counters and the class occupancy inside
//! the same call, so the store is consistent between any two calls.

use super::constants::{MAX_CLASSES, MAX_STUDENTS, NAME_MAX_LEN, RA_MAX_LEN};
use super::errors::{Collection, RecordError};
use super::model::{bounded, Class, ClassReport, EditOutcome, ReportLine, Student};
use crate::auth::Role;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fixed-capacity store of classes and students
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    classes: Vec<Class>,
    students: Vec<Student>,
    active_class_count: usize,
    active_student_count: usize,
}

impl Store {
    /// Create an empty store with the given slot counts
    pub fn new(max_classes: usize, max_students: usize) -> Self {
        Store {
            classes: vec![Class::default(); max_classes],
            students: vec![Student::default(); max_students],
            active_class_count: 0,
            active_student_count: 0,
        }
    }

    pub fn class_slots(&self) -> &[Class] {
        &self.classes
    }

    pub fn student_slots(&self) -> &[Student] {
        &self.students
    }

    pub fn active_class_count(&self) -> usize {
        self.active_class_count
    }

    pub fn active_student_count(&self) -> usize {
        self.active_student_count
    }

    pub fn max_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn max_students(&self) -> usize {
        self.students.len()
    }

    /// Slot index of the active class with this id
    pub fn lookup_class_by_id(&self, id: u32) -> Option<usize> {
        self.classes.iter().position(|c| c.active && c.id == id)
    }

    /// Slot index of the active student with this registration id
    pub fn lookup_student_by_registration(&self, registration_id: &str) -> Option<usize> {
        let ra = bounded(registration_id, RA_MAX_LEN);
        self.students
            .iter()
            .position(|s| s.active && s.registration_id == ra)
    }

    pub fn class(&self, id: u32) -> Option<&Class> {
        self.lookup_class_by_id(id).map(|idx| &self.classes[idx])
    }

    pub fn student(&self, registration_id: &str) -> Option<&Student> {
        self.lookup_student_by_registration(registration_id)
            .map(|idx| &self.students[idx])
    }

    /// Create a class in the first free slot, returning its id
    pub fn create_class(&mut self, name: &str, capacity: i32) -> Result<u32, RecordError> {
        if self.active_class_count >= self.classes.len() {
            warn!(limit = self.classes.len(), "class slots exhausted");
            return Err(RecordError::CapacityExceeded {
                collection: Collection::Classes,
                limit: self.classes.len(),
            });
        }
        if capacity <= 0 {
            return Err(RecordError::InvalidInput(format!(
                "capacity must be positive, got {}",
                capacity
            )));
        }

        // The count check above guarantees a free slot
        let idx = self
            .classes
            .iter()
            .position(|c| !c.active)
            .ok_or(RecordError::CapacityExceeded {
                collection: Collection::Classes,
                limit: self.classes.len(),
            })?;

        let id = idx as u32 + 1;
        self.classes[idx] = Class {
            id,
            name: bounded(name, NAME_MAX_LEN),
            capacity: capacity as u32,
            occupied: 0,
            active: true,
        };
        self.active_class_count += 1;

        debug!(id, slot = idx, capacity, "class created");
        Ok(id)
    }

    /// Enroll a new student in an active class
    pub fn create_student(
        &mut self,
        name: &str,
        registration_id: &str,
        class_id: u32,
    ) -> Result<(), RecordError> {
        if self.active_student_count >= self.students.len() {
            warn!(limit = self.students.len(), "student slots exhausted");
            return Err(RecordError::CapacityExceeded {
                collection: Collection::Students,
                limit: self.students.len(),
            });
        }
        let ra = bounded(registration_id, RA_MAX_LEN);
        if self.lookup_student_by_registration(&ra).is_some() {
            return Err(RecordError::DuplicateKey(ra));
        }
        let class_idx = self
            .lookup_class_by_id(class_id)
            .ok_or(RecordError::ClassNotFound(class_id))?;
        let class = &self.classes[class_idx];
        if class.is_full() {
            return Err(RecordError::ClassFull {
                id: class.id,
                name: class.name.clone(),
            });
        }

        let idx = self
            .students
            .iter()
            .position(|s| !s.active)
            .ok_or(RecordError::CapacityExceeded {
                collection: Collection::Students,
                limit: self.students.len(),
            })?;

        self.students[idx] = Student {
            registration_id: ra,
            name: bounded(name, NAME_MAX_LEN),
            class_id,
            scores: [0.0; 3],
            average: 0.0,
            active: true,
        };
        self.active_student_count += 1;
        self.classes[class_idx].occupied += 1;

        debug!(class_id, slot = idx, "student enrolled");
        Ok(())
    }

    /// Record three scores for a student, returning the new average.
    ///
    /// This is the only operation that checks the caller's role itself.
    pub fn record_scores(
        &mut self,
        registration_id: &str,
        scores: [f32; 3],
        caller_role: Role,
    ) -> Result<f32, RecordError> {
        if caller_role < Role::Professor {
            warn!(role = %caller_role, "score recording refused");
            return Err(RecordError::PermissionDenied {
                required: Role::Professor,
                actual: caller_role,
            });
        }
        let idx = self
            .lookup_student_by_registration(registration_id)
            .ok_or_else(|| RecordError::StudentNotFound(registration_id.to_string()))?;

        let student = &mut self.students[idx];
        student.set_scores(scores);
        debug!(slot = idx, average = student.average, "scores recorded");
        Ok(student.average)
    }

    /// Rename and/or transfer a student.
    ///
    /// The name is written before the transfer is validated: when the target
    /// class is full the call fails but the new name stays in place.
    pub fn edit_student(
        &mut self,
        registration_id: &str,
        new_name: &str,
        new_class_id: Option<u32>,
    ) -> Result<EditOutcome, RecordError> {
        let idx = self
            .lookup_student_by_registration(registration_id)
            .ok_or_else(|| RecordError::StudentNotFound(registration_id.to_string()))?;
        let mut outcome = EditOutcome::default();

        if !new_name.is_empty() {
            self.students[idx].rename(new_name);
            outcome.renamed = true;
        }

        let current_class = self.students[idx].class_id;
        match new_class_id {
            Some(target) if target != 0 && target != current_class => {
                match self.lookup_class_by_id(target) {
                    None => {
                        warn!(target, "transfer target missing, transfer skipped");
                        outcome.skipped_transfer = Some(target);
                    }
                    Some(target_idx) if self.classes[target_idx].is_full() => {
                        let class = &self.classes[target_idx];
                        return Err(RecordError::ClassFull {
                            id: class.id,
                            name: class.name.clone(),
                        });
                    }
                    Some(target_idx) => {
                        if let Some(old_idx) = self.lookup_class_by_id(current_class) {
                            let old = &mut self.classes[old_idx];
                            old.occupied = old.occupied.saturating_sub(1);
                        }
                        self.classes[target_idx].occupied += 1;
                        self.students[idx].class_id = target;
                        outcome.transferred_to = Some(target);
                    }
                }
            }
            _ => {}
        }

        if !outcome.renamed && outcome.transferred_to.is_none() {
            return Err(RecordError::NoChange);
        }
        debug!(slot = idx, ?outcome, "student edited");
        Ok(outcome)
    }

    /// Logically delete a student and free their seat
    pub fn delete_student(&mut self, registration_id: &str) -> Result<(), RecordError> {
        let idx = self
            .lookup_student_by_registration(registration_id)
            .ok_or_else(|| RecordError::StudentNotFound(registration_id.to_string()))?;

        // The class may already be gone; only a resolvable class gives a seat back
        if let Some(class_idx) = self.lookup_class_by_id(self.students[idx].class_id) {
            let class = &mut self.classes[class_idx];
            class.occupied = class.occupied.saturating_sub(1);
        }

        self.students[idx].active = false;
        self.active_student_count -= 1;
        debug!(slot = idx, "student deleted");
        Ok(())
    }

    /// Logically delete a class and every active student in it.
    ///
    /// Returns how many students were deactivated by the cascade.
    pub fn delete_class(&mut self, id: u32) -> Result<usize, RecordError> {
        let class_idx = self
            .lookup_class_by_id(id)
            .ok_or(RecordError::ClassNotFound(id))?;

        let mut cascaded = 0;
        for student in self.students.iter_mut() {
            if student.active && student.class_id == id {
                student.active = false;
                cascaded += 1;
            }
        }
        self.active_student_count -= cascaded;

        let class = &mut self.classes[class_idx];
        class.active = false;
        class.occupied = 0;
        self.active_class_count -= 1;

        debug!(id, cascaded, "class deleted");
        Ok(cascaded)
    }

    /// Order active students by name.
    ///
    /// Exchange sort over the slot array that skips inactive slots on both
    /// sides, so inactive slots keep their positions.
    pub fn sort_students_by_name(&mut self) {
        let len = self.students.len();
        for i in 0..len.saturating_sub(1) {
            if !self.students[i].active {
                continue;
            }
            for j in i + 1..len {
                if !self.students[j].active {
                    continue;
                }
                if self.students[i].name > self.students[j].name {
                    self.students.swap(i, j);
                }
            }
        }
        debug!(active = self.active_student_count, "students sorted by name");
    }

    /// Active classes in slot order
    pub fn list_active_classes(&self) -> impl Iterator<Item = &Class> + Clone + '_ {
        self.classes.iter().filter(|c| c.active)
    }

    /// Active students in slot order
    pub fn list_active_students(&self) -> impl Iterator<Item = &Student> + Clone + '_ {
        self.students.iter().filter(|s| s.active)
    }

    /// Report lines for every active student of an active class
    pub fn generate_class_report(&self, class_id: u32) -> Result<ClassReport, RecordError> {
        let class = self
            .class(class_id)
            .ok_or(RecordError::ClassNotFound(class_id))?;
        let lines = self
            .list_active_students()
            .filter(|s| s.class_id == class_id)
            .map(ReportLine::from)
            .collect();
        Ok(ClassReport {
            class: class.clone(),
            lines,
        })
    }

    /// Verify counters, occupancy and key uniqueness.
    ///
    /// An active student must name a class slot, which need not be active.
    /// Returns a description of the first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        let active_classes = self.classes.iter().filter(|c| c.active).count();
        if active_classes != self.active_class_count {
            return Err(format!(
                "active class counter is {} but {} class slots are active",
                self.active_class_count, active_classes
            ));
        }
        let active_students = self.students.iter().filter(|s| s.active).count();
        if active_students != self.active_student_count {
            return Err(format!(
                "active student counter is {} but {} student slots are active",
                self.active_student_count, active_students
            ));
        }

        for (idx, class) in self.classes.iter().enumerate().filter(|(_, c)| c.active) {
            if class.id != idx as u32 + 1 {
                return Err(format!("class in slot {} has id {}", idx, class.id));
            }
            if class.capacity == 0 || class.occupied > class.capacity {
                return Err(format!(
                    "class {} has occupancy {}/{}",
                    class.id, class.occupied, class.capacity
                ));
            }
            let enrolled = self
                .list_active_students()
                .filter(|s| s.class_id == class.id)
                .count();
            if enrolled != class.occupied as usize {
                return Err(format!(
                    "class {} records {} occupied seats but has {} active students",
                    class.id, class.occupied, enrolled
                ));
            }
        }

        for (i, student) in self.students.iter().enumerate().filter(|(_, s)| s.active) {
            let class_slot = (student.class_id as usize).checked_sub(1);
            // Any class slot will do, active or not
            if class_slot.map_or(true, |slot| slot >= self.classes.len()) {
                return Err(format!(
                    "student '{}' references class {} outside the class slots",
                    student.registration_id, student.class_id
                ));
            }
            let duplicate = self.students[i + 1..]
                .iter()
                .any(|other| other.active && other.registration_id == student.registration_id);
            if duplicate {
                return Err(format!(
                    "RA '{}' is held by more than one active student",
                    student.registration_id
                ));
            }
        }
        Ok(())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(MAX_CLASSES, MAX_STUDENTS)
    }
}
