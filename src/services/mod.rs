pub mod payment_delta_service;
pub mod payment_type_service;
pub mod platform_client;
pub mod pricing_service;
pub mod request_sequencer;
pub mod timeline_service;
