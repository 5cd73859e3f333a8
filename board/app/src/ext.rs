// peripheral map generated by build.rs from config/config.toml
include!(concat!(env!("OUT_DIR"), "/_ext.rs"));
