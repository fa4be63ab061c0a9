//! API endpoint URL builders
//!
//! `base_url` already includes the `/api` prefix. The backend's router
//! requires trailing slashes.

use equiviz_common::types::DatasetId;

/// `GET` list of datasets
pub fn datasets_url(base_url: &str) -> String {
    format!("{}/datasets/", base_url)
}

/// `GET` detail or `DELETE` a dataset
pub fn dataset_url(base_url: &str, id: DatasetId) -> String {
    format!("{}/datasets/{}/", base_url, id)
}

/// `GET` server-computed analytics
pub fn analytics_url(base_url: &str, id: DatasetId) -> String {
    format!("{}/datasets/{}/analytics/", base_url, id)
}

/// `GET` equipment records only
pub fn equipment_url(base_url: &str, id: DatasetId) -> String {
    format!("{}/datasets/{}/equipment/", base_url, id)
}

/// `GET` PDF report
pub fn report_url(base_url: &str, id: DatasetId) -> String {
    format!("{}/datasets/{}/download-report/", base_url, id)
}

/// `POST` multipart upload
pub fn upload_url(base_url: &str) -> String {
    format!("{}/upload/", base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8000/api";

    #[test]
    fn test_datasets_url() {
        assert_eq!(datasets_url(BASE), "http://localhost:8000/api/datasets/");
    }

    #[test]
    fn test_dataset_scoped_urls() {
        let id = DatasetId(12);
        assert_eq!(dataset_url(BASE, id), "http://localhost:8000/api/datasets/12/");
        assert_eq!(analytics_url(BASE, id), "http://localhost:8000/api/datasets/12/analytics/");
        assert_eq!(equipment_url(BASE, id), "http://localhost:8000/api/datasets/12/equipment/");
        assert_eq!(
            report_url(BASE, id),
            "http://localhost:8000/api/datasets/12/download-report/"
        );
    }

    #[test]
    fn test_upload_url() {
        assert_eq!(upload_url(BASE), "http://localhost:8000/api/upload/");
    }
}
