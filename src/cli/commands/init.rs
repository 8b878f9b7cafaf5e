use crate::config::Config;
use crate::errors::AppResult;

pub fn handle() -> AppResult<i32> {
    Config::init_all()?;
    Ok(0)
}
