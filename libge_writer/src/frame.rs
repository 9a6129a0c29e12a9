use ndarray::{ArrayD, IxDyn};

use super::error::GeFileError;

/// Type tag reported alongside an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    Int,
    Double,
    Text,
}

/// A typed scalar or string value attached to a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Int(i32),
    Double(f64),
    Text(String),
}

impl AttributeValue {
    pub fn type_tag(&self) -> AttributeType {
        match self {
            AttributeValue::Int(_) => AttributeType::Int,
            AttributeValue::Double(_) => AttributeType::Double,
            AttributeValue::Text(_) => AttributeType::Text,
        }
    }

    /// Byte size of the stored value as reported to diagnostics
    pub fn byte_size(&self) -> usize {
        match self {
            AttributeValue::Int(_) => std::mem::size_of::<i32>(),
            AttributeValue::Double(_) => std::mem::size_of::<f64>(),
            AttributeValue::Text(text) => text.len(),
        }
    }

    /// Decode the value as a native integer. Only integer-typed values decode;
    /// anything else returns None and is ignored by the extraction pass.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            AttributeValue::Int(value) => Some(*value),
            _ => None,
        }
    }
}

/// A named, typed value attached to a frame by the upstream source.
///
/// The description is carried through from the source but is not interpreted
/// anywhere downstream.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub description: String,
    pub value: AttributeValue,
}

impl Attribute {
    pub fn new(name: &str, description: &str, value: AttributeValue) -> Self {
        Attribute {
            name: String::from(name),
            description: String::from(description),
            value,
        }
    }

    /// The (type tag, byte size) pair for a value, used by diagnostics
    pub fn value_info(&self) -> (AttributeType, usize) {
        (self.value.type_tag(), self.value.byte_size())
    }
}

/// One frame delivered by the upstream source: a multi-dimensional integer
/// payload plus an ordered list of named attributes.
///
/// Frames are borrowed read-only by the writer; only the attribute list is
/// traversed for metadata.
#[derive(Debug, Clone)]
pub struct Frame {
    pub data: ArrayD<i32>,
    pub attributes: Vec<Attribute>,
}

impl Frame {
    pub fn new(data: ArrayD<i32>, attributes: Vec<Attribute>) -> Self {
        Frame { data, attributes }
    }

    /// Construct a frame from a flat buffer, the common case for event data
    pub fn from_flat(data: Vec<i32>, attributes: Vec<Attribute>) -> Self {
        let length = data.len();
        Frame {
            data: ArrayD::from_shape_vec(IxDyn(&[length]), data).unwrap(),
            attributes,
        }
    }

    /// View the payload as the flat native-integer buffer the Ge format dumps.
    ///
    /// Fails if the array is not in contiguous standard layout.
    pub fn payload(&self) -> Result<&[i32], GeFileError> {
        self.data.as_slice().ok_or(GeFileError::NonContiguousPayload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_value_info() {
        let attr = Attribute::new("maia_num_events", "event count", AttributeValue::Int(7));
        assert_eq!(attr.value_info(), (AttributeType::Int, 4));

        let attr = Attribute::new("gain", "detector gain", AttributeValue::Double(1.5));
        assert_eq!(attr.value_info(), (AttributeType::Double, 8));

        let attr = Attribute::new("label", "", AttributeValue::Text(String::from("maia")));
        assert_eq!(attr.value_info(), (AttributeType::Text, 4));
    }

    #[test]
    fn test_only_integers_decode() {
        assert_eq!(AttributeValue::Int(42).as_int(), Some(42));
        assert_eq!(AttributeValue::Double(42.0).as_int(), None);
        assert_eq!(AttributeValue::Text(String::from("42")).as_int(), None);
    }

    #[test]
    fn test_flat_payload() {
        let frame = Frame::from_flat(vec![1, 2, 3], Vec::new());
        assert_eq!(frame.payload().unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn test_multi_dimensional_payload() {
        let data = ArrayD::from_shape_vec(IxDyn(&[2, 3]), vec![1, 2, 3, 4, 5, 6]).unwrap();
        let frame = Frame::new(data, Vec::new());
        assert_eq!(frame.payload().unwrap(), &[1, 2, 3, 4, 5, 6]);
    }
}
