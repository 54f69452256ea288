// Capacity and field bounds for the record store

/// Default number of class slots
pub const MAX_CLASSES: usize = 20;

/// Default number of student slots
pub const MAX_STUDENTS: usize = 100;

/// Longest stored name, in characters
pub const NAME_MAX_LEN: usize = 49;

/// Longest stored registration id, in characters
pub const RA_MAX_LEN: usize = 9;

/// Averages at or above this are approved
pub const APPROVAL_THRESHOLD: f32 = 7.0;

/// Averages at or above this (and below approval) go to remedial
pub const REMEDIAL_THRESHOLD: f32 = 5.0;
