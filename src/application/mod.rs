pub mod thumbnail_service;
