//! Hosting layer for [wirebox_di] based applications.
//!
//! A hosting program typically builds a
//! [ConfigurationSource](config::ConfigurationSource), registers its
//! services against an [Application](application::Application) during the
//! single-threaded setup phase, and then calls
//! [start](application::Application::start), which freezes the registrations
//! into a [ServiceProvider](wirebox_di::provider::ServiceProvider) used for
//! all further resolution. Supporting infrastructure, e.g. logging, is
//! configured along the way.

pub mod application;
pub mod config;
