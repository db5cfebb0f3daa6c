//! Typed CSV schemas for the pipeline's tabular interfaces.
//!
//! Column names are fixed contracts (§ external interfaces) and bound with
//! serde renames, so a missing or mistyped column fails at load time
//! instead of surfacing as a wrong answer later.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::geo::LatLon;
use crate::error::Result;
use crate::pipeline::coverage::{Vine, VineCoverage};
use crate::pipeline::{GpsSample, ImageMatch};
use crate::rows::{Endpoint, SurveyPoint};

/// One record of the row survey table.
#[derive(Debug, Clone, Deserialize)]
pub struct RowSurveyRecord {
    #[serde(rename = "Row")]
    pub row: i32,
    /// "S" or "E".
    #[serde(rename = "ID")]
    pub endpoint: EndpointTag,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
}

/// Survey endpoint tag as written in the table.
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum EndpointTag {
    S,
    E,
}

impl From<EndpointTag> for Endpoint {
    fn from(tag: EndpointTag) -> Self {
        match tag {
            EndpointTag::S => Endpoint::Start,
            EndpointTag::E => Endpoint::End,
        }
    }
}

/// One record of the image GPS log.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageGpsRecord {
    #[serde(rename = "Image_ID")]
    pub image_id: i64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
}

/// One record of the grapevine position table.
#[derive(Debug, Clone, Deserialize)]
pub struct VineRecord {
    #[serde(rename = "Row")]
    pub row: i32,
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
}

/// Output record of the grapevine coverage table.
#[derive(Debug, Clone, Serialize)]
struct CoverageOutRecord {
    #[serde(rename = "Row")]
    row: i32,
    #[serde(rename = "ID")]
    id: i32,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Coverage_Start_Lon")]
    coverage_start_lon: Option<f64>,
    #[serde(rename = "Coverage_Start_Lat")]
    coverage_start_lat: Option<f64>,
    #[serde(rename = "Coverage_End_Lon")]
    coverage_end_lon: Option<f64>,
    #[serde(rename = "Coverage_End_Lat")]
    coverage_end_lat: Option<f64>,
}

/// Output record of the final matched table.
#[derive(Debug, Clone, Serialize)]
struct MatchedOutRecord {
    #[serde(rename = "Image_ID")]
    image_id: i64,
    #[serde(rename = "Direction")]
    direction: &'static str,
    #[serde(rename = "Camera_Long")]
    camera_long: f64,
    #[serde(rename = "Camera_Lat")]
    camera_lat: f64,
    #[serde(rename = "Assigned_Row")]
    assigned_row: i32,
    #[serde(rename = "FOV_Center_Long")]
    fov_center_long: Option<f64>,
    #[serde(rename = "FOV_Center_Lat")]
    fov_center_lat: Option<f64>,
    #[serde(rename = "FOV_Left_Long")]
    fov_left_long: Option<f64>,
    #[serde(rename = "FOV_Left_Lat")]
    fov_left_lat: Option<f64>,
    #[serde(rename = "FOV_Right_Long")]
    fov_right_long: Option<f64>,
    #[serde(rename = "FOV_Right_Lat")]
    fov_right_lat: Option<f64>,
    #[serde(rename = "Covered_Vines")]
    covered_vines: String,
}

/// Load and parse the row survey table.
pub fn load_row_survey(path: &Path) -> Result<Vec<SurveyPoint>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut points = Vec::new();
    for record in reader.deserialize() {
        let r: RowSurveyRecord = record?;
        points.push(SurveyPoint {
            row: r.row,
            endpoint: r.endpoint.into(),
            position: LatLon::new(r.longitude, r.latitude),
        });
    }
    Ok(points)
}

/// Load the image GPS log.
pub fn load_image_gps(path: &Path) -> Result<Vec<GpsSample>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut samples = Vec::new();
    for record in reader.deserialize() {
        let r: ImageGpsRecord = record?;
        samples.push(GpsSample {
            image_id: r.image_id,
            position: LatLon::new(r.longitude, r.latitude),
        });
    }
    Ok(samples)
}

/// Load the grapevine position table.
pub fn load_vines(path: &Path) -> Result<Vec<Vine>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut vines = Vec::new();
    for record in reader.deserialize() {
        let r: VineRecord = record?;
        vines.push(Vine {
            row: r.row,
            id: r.id,
            position: LatLon::new(r.longitude, r.latitude),
        });
    }
    Ok(vines)
}

/// Write the grapevine coverage table.
pub fn write_coverage_table(path: &Path, coverage: &[VineCoverage]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for c in coverage {
        writer.serialize(CoverageOutRecord {
            row: c.vine.row,
            id: c.vine.id,
            longitude: c.vine.position.lon,
            latitude: c.vine.position.lat,
            coverage_start_lon: c.start.map(|p| p.lon),
            coverage_start_lat: c.start.map(|p| p.lat),
            coverage_end_lon: c.end.map(|p| p.lon),
            coverage_end_lat: c.end.map(|p| p.lat),
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the final matched table.
pub fn write_matched_table(path: &Path, images: &[ImageMatch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for m in images {
        writer.serialize(MatchedOutRecord {
            image_id: m.image_id,
            direction: m.direction.as_str(),
            camera_long: m.camera.lon,
            camera_lat: m.camera.lat,
            assigned_row: m.assigned_row,
            fov_center_long: m.fov.center.map(|p| p.lon),
            fov_center_lat: m.fov.center.map(|p| p.lat),
            fov_left_long: m.fov.left.map(|p| p.lon),
            fov_left_lat: m.fov.left.map(|p| p.lat),
            fov_right_long: m.fov.right.map(|p| p.lon),
            fov_right_lat: m.fov.right.map(|p| p.lat),
            covered_vines: m.covered.join(","),
        })?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_survey_table_parses() {
        let data = "Row,ID,Longitude,Latitude\n1,S,-76.98,42.88\n1,E,-76.97,42.88\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let records: Vec<RowSurveyRecord> =
            reader.deserialize().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row, 1);
        assert!(matches!(records[0].endpoint, EndpointTag::S));
        assert!(matches!(records[1].endpoint, EndpointTag::E));
    }

    #[test]
    fn test_bad_endpoint_tag_is_rejected() {
        let data = "Row,ID,Longitude,Latitude\n1,X,-76.98,42.88\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let result: std::result::Result<Vec<RowSurveyRecord>, _> =
            reader.deserialize().collect();
        assert!(result.is_err());
    }

    #[test]
    fn test_gps_log_parses_by_column_name() {
        // Column order must not matter.
        let data = "Latitude,Image_ID,Longitude\n42.88,17,-76.98\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let records: Vec<ImageGpsRecord> =
            reader.deserialize().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(records[0].image_id, 17);
        assert_eq!(records[0].longitude, -76.98);
    }

    #[test]
    fn test_matched_record_empty_fov_cells() {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer
            .serialize(MatchedOutRecord {
                image_id: 1,
                direction: "F",
                camera_long: 1.0,
                camera_lat: 2.0,
                assigned_row: 3,
                fov_center_long: None,
                fov_center_lat: None,
                fov_left_long: None,
                fov_left_lat: None,
                fov_right_long: None,
                fov_right_lat: None,
                covered_vines: String::new(),
            })
            .unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Image_ID,Direction,Camera_Long,Camera_Lat,Assigned_Row,\
             FOV_Center_Long,FOV_Center_Lat,FOV_Left_Long,FOV_Left_Lat,\
             FOV_Right_Long,FOV_Right_Lat,Covered_Vines"
        );
        assert_eq!(lines.next().unwrap(), "1,F,1.0,2.0,3,,,,,,,");
    }
}
