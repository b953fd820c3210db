pub mod region_script;
