mod ip_api_provider;

pub use ip_api_provider::IpApiProvider;
