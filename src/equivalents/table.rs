// src/equivalents/table.rs
//! Known Windows applications and their Linux package candidates
//!
//! Order matters: the all-words rule returns the first qualifying entry, and
//! tied longest-substring matches are merged in table order. Candidates are
//! listed most-preferred first.

/// (Windows display name, Linux package candidates)
pub(super) const KNOWLEDGE_BASE: &[(&str, &[&str])] = &[
    ("Microsoft Office", &["libreoffice", "onlyoffice-desktopeditors", "wps-office"]),
    ("Microsoft Word", &["libreoffice-writer", "onlyoffice-desktopeditors", "wps-office"]),
    ("Microsoft Excel", &["libreoffice-calc", "onlyoffice-desktopeditors", "wps-office"]),
    ("Microsoft PowerPoint", &["libreoffice-impress", "onlyoffice-desktopeditors", "wps-office"]),
    ("Microsoft Outlook", &["thunderbird", "evolution", "kmail"]),
    ("Adobe Photoshop", &["gimp", "krita", "photopea-desktop"]),
    ("Adobe Illustrator", &["inkscape", "vectr"]),
    ("Adobe Acrobat Reader", &["okular", "evince", "zathura", "xpdf"]),
    ("Adobe Acrobat Pro", &["masterpdfeditor-free", "okular", "evince", "pdfstudioviewer"]),
    ("Adobe Premiere Pro", &["kdenlive", "shotcut", "davinci-resolve", "olive-editor"]),
    ("Adobe After Effects", &["natron", "blender", "cavalry"]),
    ("Notepad++", &["kate", "gedit", "mousepad", "sublime-text", "vscode", "neovim"]),
    ("7-Zip", &["p7zip-full", "ark", "file-roller", "engrampa"]),
    ("WinRAR", &["unrar", "p7zip-full", "ark", "file-roller", "engrampa"]),
    ("VLC media player", &["vlc", "mpv", "smplayer", "celluloid"]),
    ("Google Chrome", &["google-chrome-stable", "chromium-browser", "brave-browser", "vivaldi"]),
    ("Mozilla Firefox", &["firefox", "librewolf", "waterfox"]),
    ("Microsoft Edge", &["microsoft-edge-stable", "chromium-browser"]),
    ("iTunes", &["rhythmbox", "strawberry", "clementine", "lollypop", "elisa"]),
    ("Spotify", &["spotify-client", "ncspot"]),
    ("Steam", &["steam-installer", "steam", "lutris"]),
    ("Visual Studio Code", &["code", "vscodium", "lapce"]),
    ("Visual Studio", &["monodevelop", "kdevelop", "eclipse", "rider", "netbeans"]),
    ("Slack", &["slack-desktop", "ferdi"]),
    ("Zoom", &["zoom", "jitsi-meet-desktop"]),
    ("Skype", &["skypeforlinux-stable-bin", "teams-for-linux"]),
    ("TeamViewer", &["teamviewer", "remmina", "anydesk"]),
    ("Discord", &["discord", "webcord"]),
    ("Telegram Desktop", &["telegram-desktop", "kotatogram-desktop"]),
    ("WhatsApp Desktop", &["whatsapp-for-linux", "ferdi", "franz"]),
    ("Lightshot", &["flameshot", "ksnip", "shutter", "spectacle"]),
    ("Paint.NET", &["pinta", "krita"]),
    ("Microsoft Paint", &["kolourpaint", "drawing", "gpaint", "mypaint"]),
    ("WinSCP", &["filezilla", "nautilus", "dolphin", "openssh-client"]),
    ("PuTTY", &["openssh-client", "kitty", "terminator", "tilix", "konsole", "gnome-terminal"]),
    ("FileZilla", &["filezilla", "lftp"]),
    ("μTorrent", &["qbittorrent", "transmission-gtk", "deluge", "ktorrent"]),
    ("CCleaner", &["bleachbit", "stacer", "sweeper"]),
    ("Recuva", &["testdisk", "photorec", "r-studio"]),
    ("TeamSpeak", &["teamspeak3-client", "mumble"]),
    ("Windows Media Player", &["vlc", "mpv", "totem", "rhythmbox", "smplayer"]),
    ("Sublime Text", &["sublime-text", "sublime-merge"]),
    ("VMware Workstation Player", &["virtualbox", "qemu", "kvm", "vmware-workstation-player", "gnome-boxes"]),
    ("VMware Workstation Pro", &["virtualbox", "qemu", "kvm", "vmware-workstation-pro", "gnome-boxes"]),
    ("Oracle VM VirtualBox", &["virtualbox", "qemu", "kvm", "gnome-boxes"]),
    ("Docker Desktop", &["docker-ce", "podman", "rancher-desktop"]),
    ("Git", &["git", "git-cola", "gitkraken"]),
    ("Python", &["python3", "python"]),
    ("Java Development Kit", &["openjdk", "oracle-jdk", "amazon-corretto"]),
    ("Node.js", &["nodejs", "nvm", "fnm"]),
    ("OBS Studio", &["obs-studio"]),
    ("Audacity", &["audacity", "ardour", "ocenaudio"]),
    ("Blender", &["blender"]),
    ("KeePassXC", &["keepassxc", "bitwarden-desktop", "gnome-keyring", "kwalletmanager"]),
    ("Bitwarden", &["bitwarden-desktop", "keepassxc"]),
    ("Dropbox", &["dropbox", "rclone", "nextcloud-client"]),
    ("Google Drive", &["google-drive-ocamlfuse", "rclone", "insync", "nextcloud-client"]),
    ("OneDrive", &["onedrive-abraunegg", "rclone", "insync", "nextcloud-client"]),
    ("GIMP", &["gimp"]),
    ("Inkscape", &["inkscape"]),
    ("Krita", &["krita"]),
    ("LibreOffice", &["libreoffice", "onlyoffice-desktopeditors"]),
    ("PowerISO", &["acetoneiso", "furiusisomount"]),
    ("WinZip", &["ark", "file-roller", "p7zip-full"]),
    ("CPU-Z", &["cpu-x", "hardinfo"]),
    ("HWiNFO", &["hardinfo", "hw-probe"]),
    ("Rufus", &["unetbootin", "balenaetcher", "ventoy"]),
    ("balenaEtcher", &["balenaetcher", "unetbootin", "ventoy"]),
    ("XnView MP", &["gwenview", "nomacs", "geeqie"]),
    ("IrfanView", &["gwenview", "nomacs", "geeqie"]),
    ("Foobar2000", &["strawberry", "deadbeef", "audacious"]),
    ("Winamp", &["audacious", "qmmp", "strawberry"]),
    ("AutoCAD", &["freecad", "librecad", "qcad", "bricscad-shape"]),
    ("SolidWorks", &["freecad", "openscad"]),
    ("MATLAB", &["octave", "scilab", "sagemath"]),
    // Usually shipped as a vendor download rather than a distro package
    ("Unity Hub", &["unityhub"]),
    ("Epic Games Launcher", &["lutris", "heroic-games-launcher"]),
];
