use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::error::{MalformedResponse, PREDICTION_FAILED_MESSAGE};

/// Body returned by the prediction endpoint, for both success and failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    /// An absent flag is a failure, like a falsy flag.
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_animal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_probabilities",
        serialize_with = "serialize_probabilities"
    )]
    pub all_probabilities: Option<Vec<ClassProbability>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    pub label: String,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_label: String,
    pub confidence: f64,
    /// In the order the server sent them; values are not normalized.
    pub probabilities: Vec<ClassProbability>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Success(PredictionResult),
    Failure(String),
}

impl PredictResponse {
    pub fn success(result: &PredictionResult) -> Self {
        Self {
            success: true,
            predicted_animal: Some(result.predicted_label.clone()),
            confidence: Some(result.confidence),
            all_probabilities: Some(result.probabilities.clone()),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            predicted_animal: None,
            confidence: None,
            all_probabilities: None,
            error: Some(message.into()),
        }
    }

    pub fn into_outcome(self) -> Result<PredictionOutcome, MalformedResponse> {
        if !self.success {
            let message = self
                .error
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| PREDICTION_FAILED_MESSAGE.to_string());
            return Ok(PredictionOutcome::Failure(message));
        }

        let predicted_label = self.predicted_animal.ok_or(MalformedResponse {
            field: "predicted_animal",
        })?;
        let confidence = self.confidence.ok_or(MalformedResponse {
            field: "confidence",
        })?;
        let probabilities = self.all_probabilities.ok_or(MalformedResponse {
            field: "all_probabilities",
        })?;

        Ok(PredictionOutcome::Success(PredictionResult {
            predicted_label,
            confidence,
            probabilities,
        }))
    }
}

struct ProbabilityMapVisitor;

impl<'de> Visitor<'de> for ProbabilityMapVisitor {
    type Value = Vec<ClassProbability>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map from class label to probability")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((label, probability)) = access.next_entry::<String, f64>()? {
            entries.push(ClassProbability { label, probability });
        }
        Ok(entries)
    }
}

fn deserialize_probabilities<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<ClassProbability>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptionalMap;

    impl<'de> Visitor<'de> for OptionalMap {
        type Value = Option<Vec<ClassProbability>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("null or a map from class label to probability")
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_map(ProbabilityMapVisitor).map(Some)
        }
    }

    deserializer.deserialize_option(OptionalMap)
}

fn serialize_probabilities<S>(
    probabilities: &Option<Vec<ClassProbability>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match probabilities {
        Some(entries) => {
            let mut map = serializer.serialize_map(Some(entries.len()))?;
            for entry in entries {
                map.serialize_entry(&entry.label, &entry.probability)?;
            }
            map.end()
        }
        None => serializer.serialize_none(),
    }
}
