#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use randrctl::{
    Profile, RandrCtl, RandrCtlError,
    ctl::Result,
    xrandr::{Backend, OutputState, XrandrError, apply_args, parse_query},
};

pub const QUERY: &str = "\
Screen 0: minimum 8 x 8, current 3286 x 1920, maximum 32767 x 32767
eDP1 connected primary 1366x768+0+0 (normal left inverted right x axis y axis) 309mm x 174mm
   1366x768      60.00*+  40.00
   1024x768      60.00
HDMI1 connected 1080x1920+1366+0 left (normal left inverted right x axis y axis) 527mm x 296mm
   1920x1080     60.00 +  59.94*   50.00
   1280x720      60.00
VGA1 disconnected (normal left inverted right x axis y axis)
DP1 connected (normal left inverted right x axis y axis)
   1920x1080     60.00 +
";

/// Operations a [`Recorder`] has seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListAll,
    ListAllLong,
    SwitchTo(String),
    Print(String),
    DumpCurrent(String, bool),
}

/// Stand-in controller that records calls and optionally fails them
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub calls: Rc<RefCell<Vec<Call>>>,
    pub fail: bool,
}

impl Recorder {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&mut self, call: Call) -> Result {
        self.calls.borrow_mut().push(call);
        if self.fail {
            Err(RandrCtlError::ProfileNotFound("missing".to_string()))
        } else {
            Ok(())
        }
    }
}

impl RandrCtl for Recorder {
    fn list_all(&mut self) -> Result {
        self.record(Call::ListAll)
    }

    fn list_all_long(&mut self) -> Result {
        self.record(Call::ListAllLong)
    }

    fn switch_to(&mut self, name: &str) -> Result {
        self.record(Call::SwitchTo(name.to_string()))
    }

    fn print(&mut self, name: &str) -> Result {
        self.record(Call::Print(name.to_string()))
    }

    fn dump_current(&mut self, name: &str, to_file: bool) -> Result {
        self.record(Call::DumpCurrent(name.to_string(), to_file))
    }
}

/// Backend serving a fixed query result and remembering applied argument lists
#[derive(Debug)]
pub struct FakeBackend {
    pub outputs: Vec<OutputState>,
    pub applied: RefCell<Vec<Vec<String>>>,
}

impl FakeBackend {
    pub fn from_query(text: &str) -> Self {
        Self {
            outputs: parse_query(text).expect("query should parse"),
            applied: RefCell::new(Vec::new()),
        }
    }
}

impl Backend for FakeBackend {
    fn current_outputs(&self) -> std::result::Result<Vec<OutputState>, XrandrError> {
        Ok(self.outputs.clone())
    }

    fn apply(
        &self,
        profile: &Profile,
        current: &[OutputState],
    ) -> std::result::Result<(), XrandrError> {
        let args = apply_args(profile, current)?;
        self.applied.borrow_mut().push(args);
        Ok(())
    }
}
