use super::ids::GroupId;
use nalgebra::Point3;

/// A single atom. `index` is its global position in traversal order and the
/// unit referenced by inter-group bonds.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub index: usize,
    pub name: String,
    pub serial: i32,
    pub alt_loc: Option<char>,
    pub position: Point3<f32>,
    pub occupancy: f32,
    pub b_factor: f32,
    pub element: String,
    pub charge: i32,
    pub group_id: GroupId,
}

impl Atom {
    pub fn is_hydrogen(&self) -> bool {
        matches!(self.element.to_uppercase().as_str(), "H" | "D")
    }

    pub fn has_alt_loc(&self) -> bool {
        self.alt_loc.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn sample_atom(element: &str, alt_loc: Option<char>) -> Atom {
        Atom {
            index: 0,
            name: "CA".into(),
            serial: 1,
            alt_loc,
            position: Point3::new(1.0, 2.0, 3.0),
            occupancy: 1.0,
            b_factor: 10.0,
            element: element.into(),
            charge: 0,
            group_id: GroupId::from(KeyData::from_ffi(1)),
        }
    }

    #[test]
    fn hydrogen_detection_ignores_case() {
        assert!(sample_atom("H", None).is_hydrogen());
        assert!(sample_atom("d", None).is_hydrogen());
        assert!(!sample_atom("C", None).is_hydrogen());
        assert!(!sample_atom("Hg", None).is_hydrogen());
    }

    #[test]
    fn alt_loc_presence_is_reported() {
        assert!(sample_atom("C", Some('A')).has_alt_loc());
        assert!(!sample_atom("C", None).has_alt_loc());
    }
}
