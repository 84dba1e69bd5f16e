use serde::Serialize;

use super::earthquake::Quake;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvacuationCenter {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Designated evacuation centers in Bacolod City
pub const EVACUATION_CENTERS: [EvacuationCenter; 3] = [
    EvacuationCenter {
        name: "Bacolod City Government Center",
        latitude: 10.644,
        longitude: 122.961,
    },
    EvacuationCenter {
        name: "University of St. La Salle",
        latitude: 10.680,
        longitude: 122.953,
    },
    EvacuationCenter {
        name: "STI West Negros University",
        latitude: 10.666,
        longitude: 122.949,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    EvacuationCenter,
    Earthquake,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub kind: MarkerKind,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub description: String,
}

/// Evacuation centers, plus the latest quake when it has coordinates
pub fn build_markers(quake: Option<&Quake>) -> Vec<MapMarker> {
    let mut markers: Vec<MapMarker> = EVACUATION_CENTERS
        .iter()
        .map(|center| MapMarker {
            kind: MarkerKind::EvacuationCenter,
            latitude: center.latitude,
            longitude: center.longitude,
            title: center.name.to_string(),
            description: "Evacuation Center.".to_string(),
        })
        .collect();

    if let Some(quake) = quake {
        match (quake.latitude, quake.longitude) {
            (Some(latitude), Some(longitude)) => markers.push(MapMarker {
                kind: MarkerKind::Earthquake,
                latitude,
                longitude,
                title: format!("Recent Quake: M {}", quake.magnitude),
                description: format!("{}.", quake.location),
            }),
            _ => tracing::debug!("Latest quake has no coordinates, not placing a marker"),
        }
    }

    markers
}
