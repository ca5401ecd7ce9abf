pub mod relay_router;
