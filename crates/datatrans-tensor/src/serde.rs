use ::serde::ser::SerializeStruct;
use ::serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{get_strides_from_shape, Tensor};

impl<T, const N: usize> Serialize for Tensor<T, N>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Tensor", 3)?;
        state.serialize_field("data", self.as_slice())?;
        state.serialize_field("shape", &self.shape.to_vec())?;
        state.serialize_field("strides", &self.strides.to_vec())?;
        state.end()
    }
}

impl<'de, T, const N: usize> Deserialize<'de> for Tensor<T, N>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct TensorData<T> {
            data: Vec<T>,
            shape: Vec<usize>,
            strides: Vec<usize>,
        }

        let TensorData {
            data,
            shape,
            strides,
        } = TensorData::deserialize(deserializer)?;

        let shape: [usize; N] = shape
            .try_into()
            .map_err(|_| de::Error::custom("Invalid shape"))?;

        let strides: [usize; N] = strides
            .try_into()
            .map_err(|_| de::Error::custom("Invalid strides"))?;

        let numel = shape.iter().product::<usize>();
        if numel != data.len() {
            return Err(de::Error::custom(format!(
                "shape {shape:?} expects {numel} elements, got {}",
                data.len()
            )));
        }

        // storage is always row-major
        let expected_strides = get_strides_from_shape(shape);
        if strides != expected_strides {
            return Err(de::Error::custom(format!(
                "strides {strides:?} do not match row-major strides {expected_strides:?} for shape {shape:?}"
            )));
        }

        Ok(Tensor {
            storage: data,
            shape,
            strides,
        })
    }
}
