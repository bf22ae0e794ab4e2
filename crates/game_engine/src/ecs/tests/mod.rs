//! Registry scenarios that cross several ECS modules
