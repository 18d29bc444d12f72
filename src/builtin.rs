pub const BUILTIN_CSS: &str = include_str!("builtin.css");

pub const THEME_TOGGLE_JS: &str = r#"(function () {
  var key = "tx-theme";
  var root = document.documentElement;
  var button = document.getElementById("tx-theme-toggle");

  function systemTheme() {
    try {
      return window.matchMedia("(prefers-color-scheme: dark)").matches ? "dark" : "light";
    } catch (_) {
      return "light";
    }
  }

  function current() {
    return root.getAttribute("data-theme") || systemTheme();
  }

  function apply(theme) {
    if (theme === "light" || theme === "dark") {
      root.setAttribute("data-theme", theme);
    } else {
      root.removeAttribute("data-theme");
    }
    if (button) {
      var next = current() === "dark" ? "light" : "dark";
      button.textContent = next === "dark" ? "Dark" : "Light";
      button.setAttribute("title", "Switch to " + next + " theme");
    }
  }

  var saved = null;
  try {
    saved = localStorage.getItem(key);
  } catch (_) {}
  apply(saved);

  if (button) {
    button.addEventListener("click", function () {
      var next = current() === "dark" ? "light" : "dark";
      try {
        localStorage.setItem(key, next);
      } catch (_) {}
      apply(next);
    });
  }
})();"#;
